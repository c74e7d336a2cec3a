mod client;

pub use client::TasksClient;
