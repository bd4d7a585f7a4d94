//! Die-face assets: decoding, the asset source boundary, and per-invocation resolution.

/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Asset sources, leases, and the resolver.
pub mod store;
