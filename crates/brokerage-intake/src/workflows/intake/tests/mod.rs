mod common;
mod identifiers;
mod schema;
