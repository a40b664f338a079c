// handlers/protected/mod.rs - Protected handlers (authentication gate required)
//
// Every handler here takes `CurrentUser`; the identity it carries is the only
// source of the caller's user id. Request bodies never supply an owner.
pub mod auth;
pub mod calendars;
pub mod events;
pub mod projects;
pub mod tasks;
