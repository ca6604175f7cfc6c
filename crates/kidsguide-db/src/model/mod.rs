pub mod activity;
pub mod age_group;
pub mod category;
pub mod city;
pub mod event;
pub mod location;
pub mod organization;
pub mod tag;
