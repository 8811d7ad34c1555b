mod course_room_test;
