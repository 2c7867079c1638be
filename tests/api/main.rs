mod contact_settings;
mod helpers;
