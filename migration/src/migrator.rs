use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202508040001_create_users::Migration),
            Box::new(migrations::m202508040002_create_courses::Migration),
            Box::new(migrations::m202508040003_create_course_roles::Migration),
            Box::new(migrations::m202508040004_create_folders::Migration),
            Box::new(migrations::m202508040005_create_course_files::Migration),
            Box::new(migrations::m202508060001_create_announcements::Migration),
        ]
    }
}
