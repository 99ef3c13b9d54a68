/// CSV export of placed units.
pub mod export;
