use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use beebot_rendering::SpriteKey;
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of textures loaded from the sprite manifest.
#[derive(Debug)]
pub struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads sprites from the manifest located at the provided path.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Returns the default manifest path relative to the repository root.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Draws the sprite stretched over a `size` pixel square at `position`.
    pub(crate) fn draw(&self, key: SpriteKey, position: MacroquadVec2, size: f32) -> Result<()> {
        let texture = *self
            .textures
            .get(&key)
            .with_context(|| format!("sprite {key:?} missing from atlas"))?;

        texture::draw_texture_ex(
            texture,
            position.x,
            position.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(size, size)),
                ..DrawTextureParams::default()
            },
        );
        Ok(())
    }

    /// Returns whether the atlas contains the provided key.
    #[must_use]
    pub fn contains(&self, key: SpriteKey) -> bool {
        self.textures.contains_key(&key)
    }

    /// Returns the number of textures stored in the atlas.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        entries: Vec<(SpriteKey, PathBuf)>,
        loader: &mut impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            let texture = loader(key, &path).with_context(|| {
                format!("failed to load sprite {key:?} from {}", path.display())
            })?;
            if textures.insert(key, texture).is_some() {
                bail!("duplicate sprite entry for {key:?}");
            }
            log::debug!("loaded sprite {} from {}", key.name(), path.display());
        }
        Ok(Self { textures })
    }
}

fn default_loader(_key: SpriteKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    sprites: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(SpriteKey, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.sprites {
        let key: SpriteKey = name
            .parse()
            .with_context(|| format!("sprite manifest entry `{name}` is not a known sprite"))?;
        if resolved.insert(key, base_path.join(relative_path)).is_some() {
            bail!("sprite manifest contains duplicate entry for {key:?}");
        }
    }

    SpriteKey::ALL
        .into_iter()
        .map(|key| match resolved.remove(&key) {
            Some(path) => Ok((key, path)),
            None => bail!("sprite manifest missing entry for {}", key.name()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const COMPLETE: &str = r#"
        version = 1

        [sprites]
        Obstacle = "board/obstacle.png"
        Goal = "board/goal.png"
        BeeBotAlternate = "bee/bee_2.png"
        BeeBot = "bee/bee_1.png"
    "#;

    #[test]
    fn parse_manifest_requires_all_known_keys() {
        let manifest = r#"
            version = 1

            [sprites]
            BeeBot = "bee/bee_1.png"
            Goal = "board/goal.png"
            Obstacle = "board/obstacle.png"
        "#;

        let error = parse_manifest(manifest, Path::new("assets"))
            .expect_err("manifest missing the second bee frame should fail");
        assert!(error.to_string().contains("BeeBotAlternate"));
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        let manifest = format!("{COMPLETE}\nFlower = \"flower.png\"\n");

        let result = parse_manifest(&manifest, Path::new("assets"));
        assert!(result.is_err(), "unknown keys must be rejected");
    }

    #[test]
    fn manifest_rejects_other_versions() {
        let manifest = COMPLETE.replace("version = 1", "version = 2");

        let result = parse_manifest(&manifest, Path::new("assets"));
        assert!(result.is_err());
    }

    #[test]
    fn manifest_resolves_paths_relative_to_base_directory() {
        let parsed = parse_manifest(COMPLETE, Path::new("root")).expect("manifest should parse");
        let expected = vec![
            (SpriteKey::BeeBot, PathBuf::from("root/bee/bee_1.png")),
            (SpriteKey::BeeBotAlternate, PathBuf::from("root/bee/bee_2.png")),
            (SpriteKey::Goal, PathBuf::from("root/board/goal.png")),
            (SpriteKey::Obstacle, PathBuf::from("root/board/obstacle.png")),
        ];
        assert_eq!(parsed, expected);
    }

    #[test]
    fn atlas_loads_each_texture_once_in_key_order() {
        let entries =
            parse_manifest(COMPLETE, Path::new("assets")).expect("manifest should parse");
        let load_order = RefCell::new(Vec::new());
        let atlas = SpriteAtlas::from_entries(entries, &mut |key, _| {
            load_order.borrow_mut().push(key);
            Ok(Texture2D::empty())
        })
        .expect("atlas should load using provided loader");

        assert_eq!(load_order.borrow().as_slice(), &SpriteKey::ALL);
        assert_eq!(atlas.texture_count(), SpriteKey::ALL.len());
        for key in SpriteKey::ALL {
            assert!(atlas.contains(key));
        }
    }

    #[test]
    fn loader_failures_name_the_sprite() {
        let entries = vec![(SpriteKey::Goal, PathBuf::from("missing.png"))];

        let error = SpriteAtlas::from_entries(entries, &mut |_, _| bail!("no such file"))
            .expect_err("loader failure must propagate");
        assert!(format!("{error:#}").contains("Goal"));
    }
}
