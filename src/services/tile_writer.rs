//! Persistence of encoded screens as `.scr` files.

use std::path::{Path, PathBuf};

use zx_screen::ScrTile;

use crate::error::ConvertError;

/// Target path for `tile` when `tile_count` tiles are written to `output`.
///
/// A single tile goes to `output` itself. Several tiles go next to it as
/// `<stem>_<tx>_<ty>.<ext>`.
pub fn tile_path(output: &Path, tile: &ScrTile, tile_count: usize) -> PathBuf {
    if tile_count == 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screen".to_string());
    let ext = extension(output);
    output.with_file_name(format!("{stem}_{}_{}.{ext}", tile.tx, tile.ty))
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scr".to_string())
}

/// First of `path`, `<stem>-1.<ext>`, `<stem>-2.<ext>`, ... that does not
/// exist yet.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = extension(path);
    (1u32..)
        .map(|n| path.with_file_name(format!("{stem}-{n}.{ext}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Write every tile and return the paths used, in tile order.
///
/// Existing files are kept unless `overwrite` is set; new names get a
/// numeric suffix instead.
pub fn write_tiles(
    output: &Path,
    tiles: &[ScrTile],
    overwrite: bool,
) -> Result<Vec<PathBuf>, ConvertError> {
    let mut written = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let target = tile_path(output, tile, tiles.len());
        let path = if overwrite {
            target
        } else {
            unique_path(&target)
        };
        std::fs::write(&path, &tile.bytes[..])?;
        tracing::info!(path = %path.display(), tx = tile.tx, ty = tile.ty, "Wrote SCR tile");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zx_screen::SCR_SIZE;

    fn tile(tx: usize, ty: usize) -> ScrTile {
        ScrTile {
            tx,
            ty,
            bytes: Box::new([tx as u8; SCR_SIZE]),
        }
    }

    #[test]
    fn test_single_tile_uses_output_path() {
        let path = tile_path(Path::new("out/pic.scr"), &tile(0, 0), 1);
        assert_eq!(path, PathBuf::from("out/pic.scr"));
    }

    #[test]
    fn test_multi_tile_names() {
        let path = tile_path(Path::new("out/pic.scr"), &tile(1, 0), 4);
        assert_eq!(path, PathBuf::from("out/pic_1_0.scr"));
        let path = tile_path(Path::new("pic"), &tile(0, 1), 2);
        assert_eq!(path, PathBuf::from("pic_0_1.scr"));
    }

    #[test]
    fn test_unique_path_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("pic.scr");
        assert_eq!(unique_path(&base), base);

        std::fs::write(&base, b"x").unwrap();
        assert_eq!(unique_path(&base), dir.path().join("pic-1.scr"));

        std::fs::write(dir.path().join("pic-1.scr"), b"x").unwrap();
        assert_eq!(unique_path(&base), dir.path().join("pic-2.scr"));
    }

    #[test]
    fn test_write_tiles_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("pic.scr");
        std::fs::write(&output, b"old").unwrap();

        let written = write_tiles(&output, &[tile(0, 0)], false).unwrap();
        assert_eq!(written, vec![dir.path().join("pic-1.scr")]);
        assert_eq!(std::fs::read(&output).unwrap(), b"old");
        assert_eq!(std::fs::read(&written[0]).unwrap().len(), SCR_SIZE);

        let written = write_tiles(&output, &[tile(0, 0)], true).unwrap();
        assert_eq!(written, vec![output.clone()]);
        assert_eq!(std::fs::read(&output).unwrap().len(), SCR_SIZE);
    }
}
