#![allow(dead_code)]

use anyhow::Result;
use schooldesk::{
    AppContext,
    api::ClientConfig,
    session::{MemoryStorage, Storage},
};
use std::sync::Arc;
use wiremock::MockServer;

/// Unsigned token with a `{"id":"u1","type":"admin"}` payload.
pub const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJpZCI6InUxIiwidHlwZSI6ImFkbWluIn0.sig";

pub fn context(server: &MockServer) -> Result<(AppContext, Arc<MemoryStorage>)> {
    let storage = Arc::new(MemoryStorage::new());
    let config = ClientConfig::new(&server.uri())?;
    let shared: Arc<dyn Storage> = storage.clone();
    let ctx = AppContext::new(config, shared)?;
    Ok((ctx, storage))
}

pub fn signed_in(server: &MockServer) -> Result<(AppContext, Arc<MemoryStorage>)> {
    let (ctx, storage) = context(server)?;
    ctx.session().create(TOKEN)?;
    Ok((ctx, storage))
}
