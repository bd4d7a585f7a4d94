use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode::decode_face,
    dice::request::DieType,
    foundation::error::{DiceError, DiceResult},
};

/// Raster extension of every die-face file.
pub const ASSET_EXTENSION: &str = "png";

/// Identity of one die-face asset: which die, which face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceKey {
    pub die: DieType,
    pub face: u32,
}

impl FaceKey {
    pub fn new(die: DieType, face: u32) -> Self {
        Self { die, face }
    }

    /// File name under the asset root, e.g. `D6_1.png`.
    pub fn file_name(&self) -> String {
        format!("{}.{ASSET_EXTENSION}", self)
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.die, self.face)
    }
}

#[derive(Clone, Debug)]
/// Decoded die-face glyph in premultiplied RGBA8 form.
pub struct DieFaceAsset {
    /// Die and face this glyph depicts.
    pub key: FaceKey,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Where die-face assets come from. Implementations may block on I/O.
///
/// Every successful [`AssetSource::open`] made through an [`AssetResolver`] is matched by
/// exactly one [`AssetSource::release`] for the same key.
pub trait AssetSource: Send + Sync {
    /// Load and decode one face.
    fn open(&self, key: &FaceKey) -> DiceResult<DieFaceAsset>;

    /// Called once the pipeline no longer needs an opened face.
    fn release(&self, _key: &FaceKey) {}
}

/// Filesystem asset store: `D{sides}_{face}.png` files directly under `root`.
#[derive(Clone, Debug)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Return root directory the asset files are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &FaceKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl AssetSource for FsAssetSource {
    fn open(&self, key: &FaceKey) -> DiceResult<DieFaceAsset> {
        let path = self.path_for(key);
        let bytes = std::fs::read(&path)
            .map_err(|e| DiceError::asset_not_found(format!("{}: {e}", path.display())))?;
        tracing::debug!(asset = %key, bytes = bytes.len(), "read die face");
        decode_face(*key, &bytes)
    }
}

/// An opened asset tied to the source it came from. Dropping the lease releases it.
pub struct AssetLease<'s> {
    source: &'s dyn AssetSource,
    asset: DieFaceAsset,
}

impl AssetLease<'_> {
    pub fn asset(&self) -> &DieFaceAsset {
        &self.asset
    }
}

impl Drop for AssetLease<'_> {
    fn drop(&mut self) {
        tracing::trace!(asset = %self.asset.key, "release die face");
        self.source.release(&self.asset.key);
    }
}

impl fmt::Debug for AssetLease<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetLease")
            .field("key", &self.asset.key)
            .field("width", &self.asset.width)
            .field("height", &self.asset.height)
            .finish()
    }
}

/// The distinct faces one invocation needs, each opened once and keyed by face value.
#[derive(Debug)]
pub struct ResolvedAssets<'s> {
    die: DieType,
    leases: BTreeMap<u32, AssetLease<'s>>,
}

impl ResolvedAssets<'_> {
    pub fn die(&self) -> DieType {
        self.die
    }

    pub fn get(&self, face: u32) -> Option<&DieFaceAsset> {
        self.leases.get(&face).map(AssetLease::asset)
    }

    /// Like [`ResolvedAssets::get`], but a face that was never resolved is an error.
    pub fn require(&self, face: u32) -> DiceResult<&DieFaceAsset> {
        self.get(face).ok_or_else(|| {
            DiceError::asset_not_found(format!(
                "{} was not resolved for this roll",
                FaceKey::new(self.die, face).file_name()
            ))
        })
    }

    pub fn faces(&self) -> impl Iterator<Item = u32> + '_ {
        self.leases.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.leases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leases.is_empty()
    }
}

/// Per-invocation resolver from roll values to opened die-face assets.
pub struct AssetResolver<'s> {
    source: &'s dyn AssetSource,
}

impl<'s> AssetResolver<'s> {
    pub fn new(source: &'s dyn AssetSource) -> Self {
        Self { source }
    }

    /// Open every distinct face in `rolls`, smallest face first.
    ///
    /// On failure the leases opened so far are dropped, and therefore released, before the
    /// error is returned.
    pub fn resolve(&self, die: DieType, rolls: &[u32]) -> DiceResult<ResolvedAssets<'s>> {
        let distinct: BTreeSet<u32> = rolls.iter().copied().collect();
        let mut leases = BTreeMap::new();
        for face in distinct {
            if !die.contains(face) {
                return Err(DiceError::RollOutOfRange { die, value: face });
            }
            let key = FaceKey::new(die, face);
            let asset = self.source.open(&key)?;
            leases.insert(
                face,
                AssetLease {
                    source: self.source,
                    asset,
                },
            );
        }
        tracing::debug!(%die, rolls = rolls.len(), opened = leases.len(), "resolved die faces");
        Ok(ResolvedAssets { die, leases })
    }
}

/// Result of checking an asset directory for every face of every die.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetAudit {
    /// Number of face files looked for.
    pub checked: usize,
    /// Faces with no file, in die then face order.
    pub missing: Vec<FaceKey>,
}

impl AssetAudit {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// List every `D{sides}_{face}.png` that is absent from `root`.
pub fn audit_asset_root(root: &Path) -> AssetAudit {
    let source = FsAssetSource::new(root);
    let mut audit = AssetAudit::default();
    for die in DieType::ALL {
        for face in 1..=die.sides() {
            let key = FaceKey::new(die, face);
            audit.checked += 1;
            if !source.path_for(&key).is_file() {
                audit.missing.push(key);
            }
        }
    }
    audit
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
