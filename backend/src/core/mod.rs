//! Core building blocks shared by every stage of the engine

pub mod calendar;
