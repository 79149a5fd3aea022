pub mod m202508040001_create_users;
pub mod m202508040002_create_courses;
pub mod m202508040003_create_course_roles;
pub mod m202508040004_create_folders;
pub mod m202508040005_create_course_files;
pub mod m202508060001_create_announcements;
