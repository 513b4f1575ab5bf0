pub mod ignore_rules;
pub mod snapshot;
