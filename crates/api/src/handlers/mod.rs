pub mod actors;
pub mod admin;
pub mod auth;
pub mod categories;
pub mod genres;
pub mod movies;
pub mod rating_stars;
pub mod ratings;
pub mod reviews;
pub mod stills;
