pub mod snapshot_handler;
