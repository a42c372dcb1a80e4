mod app;
mod config;
mod key_image;
mod profiles;
