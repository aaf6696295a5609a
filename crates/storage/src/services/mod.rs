pub mod record_diff;
