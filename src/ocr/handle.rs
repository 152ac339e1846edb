//! Lazily initialised, caller-owned engine handle.
//!
//! Engines are expensive to construct, so the handle builds one on first use
//! and keeps it until [`EngineHandle::reset`] is called. There is no
//! process-wide cache; whoever owns the handle owns the engine.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

type Factory<E> = Box<dyn Fn() -> anyhow::Result<E> + Send + Sync>;

pub struct EngineHandle<E> {
    cell: OnceCell<Arc<E>>,
    factory: Factory<E>,
}

impl<E: Send + Sync> EngineHandle<E> {
    pub fn new(factory: impl Fn() -> anyhow::Result<E> + Send + Sync + 'static) -> Self {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Wrap an already constructed engine.
    pub fn ready(engine: E) -> Self
    where
        E: 'static,
    {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(engine))),
            factory: Box::new(|| -> anyhow::Result<E> {
                Err(anyhow::anyhow!(
                    "engine handle was created ready and cannot be rebuilt"
                ))
            }),
        }
    }

    /// Return the engine, constructing it on the first call.
    pub async fn get(&self) -> anyhow::Result<Arc<E>> {
        let engine = self
            .cell
            .get_or_try_init(|| async {
                info!("Initializing OCR engine");
                (self.factory)().map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(engine))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Drop the cached engine; the next [`get`](Self::get) rebuilds it.
    pub fn reset(&mut self) {
        if self.cell.take().is_some() {
            info!("OCR engine cache cleared");
        }
    }
}
