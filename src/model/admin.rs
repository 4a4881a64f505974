use serde::{Deserialize, Serialize};

use crate::model::{event::EventDto, user::PhotoDto};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AdminUserDto {
    pub id: i32,
    pub email: Option<String>,
    pub name: Option<String>,
    pub facebook: Option<String>,
    pub google: Option<String>,
}

/// Everything listed on the admin panel.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AdminOverviewDto {
    pub users: Vec<AdminUserDto>,
    pub events: Vec<EventDto>,
    pub photos: Vec<PhotoDto>,
}

/// Form body of the admin delete actions.
#[derive(Deserialize, Clone, Debug)]
pub struct AdminDeleteDto {
    pub id: i32,
}
