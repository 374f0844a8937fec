pub mod config;
pub mod fallback;
pub mod i18n;
pub mod robots;
pub mod routing;
pub mod seo;
pub mod server;
pub mod sitemap;
pub mod slug;
pub mod story;
pub mod storyblok;
pub mod tracking;
pub mod urls;
