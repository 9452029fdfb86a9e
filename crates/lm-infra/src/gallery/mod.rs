mod placeholder_feed;

pub use placeholder_feed::PlaceholderGalleryFeed;
