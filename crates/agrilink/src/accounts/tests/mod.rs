mod common;

mod auth;
