pub mod catalog;
pub mod composer;
pub mod formatting;
pub mod pricing;
pub mod whatsapp;
