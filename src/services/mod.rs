pub mod providers;
pub mod ranker;
pub mod recommend;
