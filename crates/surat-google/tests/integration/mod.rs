mod letters;
mod materializer;
mod permissions;
mod sheets;
mod templates;
mod token_validation;
