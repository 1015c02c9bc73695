// Resume lifecycle endpoints: upload, fetch, edit, export.
// Parsing and rendering run on the blocking pool; the store is the only shared state.

pub mod handlers;
