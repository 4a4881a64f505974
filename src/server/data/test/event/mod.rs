use crate::server::{
    data::event::EventRepository,
    model::event::{EventParam, EventStatus, Rating},
};
use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod hosts;

fn event_param(name: &str) -> EventParam {
    EventParam {
        name: name.to_string(),
        description: "Dim sum and a walk".to_string(),
        time: Utc.with_ymd_and_hms(2017, 1, 18, 15, 0, 0).unwrap(),
        duration_hours: 3.0,
        fee: 1000,
        status: EventStatus::Upcoming,
    }
}
