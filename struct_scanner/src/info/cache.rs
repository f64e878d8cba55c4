//! Build-once cache of [`StructInfo`] keyed by type identity.
//!
//! Lookups hit a thread-local map first, so repeat decodes of a type never
//! take a lock. Misses fall back to a process-wide map behind a
//! `parking_lot::RwLock`; only successful builds are stored.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use super::StructInfo;
use crate::{ScanError, Type};

type InfoMap = HashMap<TypeId, Arc<StructInfo>>;

static SHARED: LazyLock<RwLock<InfoMap>> = LazyLock::new(|| RwLock::new(HashMap::new()));

thread_local! {
    static LOCAL: RefCell<InfoMap> = RefCell::new(HashMap::new());
}

pub(super) fn get_or_build(
    ty: Type,
    build: impl FnOnce(Type) -> Result<StructInfo, ScanError>,
) -> Result<Arc<StructInfo>, ScanError> {
    let id = ty.id();
    if let Some(info) = LOCAL.with_borrow(|local| local.get(&id).cloned()) {
        return Ok(info);
    }

    let shared = SHARED.read().get(&id).cloned();
    if let Some(info) = shared {
        return Ok(remember(id, info));
    }

    let built = Arc::new(build(ty)?);
    tracing::debug!(ty = %ty, fields = built.fields().len(), "built struct info");
    // A concurrent builder may have won the race; keep its entry.
    let info = Arc::clone(SHARED.write().entry(id).or_insert(built));
    Ok(remember(id, info))
}

fn remember(id: TypeId, info: Arc<StructInfo>) -> Arc<StructInfo> {
    LOCAL.with_borrow_mut(|local| local.insert(id, Arc::clone(&info)));
    info
}
