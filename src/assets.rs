//! Asset loading phase
//!
//! Every asset is fetched concurrently before the first run. Only the player
//! sprite is required; anything else that fails is logged and left out, and
//! the renderer or audio falls back to placeholders.

use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Every asset the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    PlayerSprite,
    FlyingSprite,
    GroundSprite,
    JumpSound,
    ScoreSound,
    HitSound,
}

impl AssetId {
    pub const ALL: [AssetId; 6] = [
        AssetId::PlayerSprite,
        AssetId::FlyingSprite,
        AssetId::GroundSprite,
        AssetId::JumpSound,
        AssetId::ScoreSound,
        AssetId::HitSound,
    ];

    /// Path relative to the asset root
    pub fn path(&self) -> &'static str {
        match self {
            AssetId::PlayerSprite => "fat_cat.png",
            AssetId::FlyingSprite => "bird.png",
            AssetId::GroundSprite => "cactus.png",
            AssetId::JumpSound => "jump.mp3",
            AssetId::ScoreSound => "score.mp3",
            AssetId::HitSound => "hit.mp3",
        }
    }

    /// Whether the game refuses to start without it
    pub fn is_required(&self) -> bool {
        matches!(self, AssetId::PlayerSprite)
    }
}

/// Where asset bytes come from (HTTP in the browser, disk natively, memory in tests)
pub trait AssetSource {
    fn fetch(&self, asset: AssetId) -> impl Future<Output = Result<Vec<u8>, AssetError>>;
}

/// Result of a finished asset phase
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    loaded: HashMap<AssetId, Vec<u8>>,
    missing: Vec<AssetId>,
}

impl AssetBundle {
    pub fn get(&self, asset: AssetId) -> Option<&[u8]> {
        self.loaded.get(&asset).map(Vec::as_slice)
    }

    /// Optional assets that failed to load, in fetch order
    pub fn missing(&self) -> &[AssetId] {
        &self.missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Fetch every asset; fails only when a required one is missing
pub async fn load_assets<S: AssetSource>(source: &S) -> Result<AssetBundle, AssetError> {
    let fetches = AssetId::ALL
        .iter()
        .map(|&asset| async move { (asset, source.fetch(asset).await) });
    let results = join_all(fetches).await;

    let mut bundle = AssetBundle::default();
    for (asset, result) in results {
        match result {
            Ok(bytes) => {
                log::debug!("Loaded {} ({} bytes)", asset.path(), bytes.len());
                bundle.loaded.insert(asset, bytes);
            }
            Err(e) if asset.is_required() => {
                log::error!("{e}");
                return Err(AssetError::RequiredAssetMissing {
                    asset,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                log::warn!("{e}; continuing without it");
                bundle.missing.push(asset);
            }
        }
    }

    log::info!(
        "Asset phase finished: {} loaded, {} missing",
        bundle.loaded.len(),
        bundle.missing.len()
    );
    Ok(bundle)
}

/// Reads assets from a directory on disk
#[cfg(not(target_arch = "wasm32"))]
pub struct DirSource {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetSource for DirSource {
    async fn fetch(&self, asset: AssetId) -> Result<Vec<u8>, AssetError> {
        std::fs::read(self.root.join(asset.path())).map_err(|e| AssetError::Fetch {
            asset,
            reason: e.to_string(),
        })
    }
}
