// External collaborators: Discord and local disk
pub mod discord;
pub mod storage;

#[cfg(test)]
pub mod fakes;
