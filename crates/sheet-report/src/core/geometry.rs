//! Coordinate mapping between the rendered page, sheet pixels and tiles.
//!
//! Three spaces are involved:
//! - client space: CSS pixels of the page viewport (pointer events, element rects),
//! - sheet space: native atlas pixels, client pixels divided by the display scale,
//! - tile space: column/row of a sprite in one sheet's grid.
//!
//! Tiles are stored row-major: index = y * stride + x.

use glam::{IVec2, UVec2, Vec2};

/// A tile resolved from a sheet pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHit {
    pub tile: UVec2,
    pub index: u32,
}

/// Tile grid of one sheet as laid out on its atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    tile_size: UVec2,
    sheet_size: UVec2,
}

impl SheetGeometry {
    /// `tile_size` and `sheet_size` are in sheet pixels.
    pub fn new(tile_size: UVec2, sheet_size: UVec2) -> Self {
        Self {
            tile_size,
            sheet_size,
        }
    }

    pub fn sheet_size(&self) -> UVec2 {
        self.sheet_size
    }

    /// Number of whole tile columns.
    pub fn stride(&self) -> u32 {
        self.sheet_size.x.checked_div(self.tile_size.x).unwrap_or(0)
    }

    /// Number of whole tile rows.
    pub fn rows(&self) -> u32 {
        self.sheet_size.y.checked_div(self.tile_size.y).unwrap_or(0)
    }

    pub fn tile_count(&self) -> u32 {
        self.stride().saturating_mul(self.rows())
    }

    pub fn contains_tile(&self, tile: UVec2) -> bool {
        tile.x < self.stride() && tile.y < self.rows()
    }

    /// Linear index of a tile, or None outside the grid.
    pub fn index_of(&self, tile: UVec2) -> Option<u32> {
        if !self.contains_tile(tile) {
            return None;
        }
        Some(tile.y * self.stride() + tile.x)
    }

    /// Tile at a linear index, or None when the index is past the last tile.
    pub fn tile_of_index(&self, index: u32) -> Option<UVec2> {
        if index >= self.tile_count() {
            return None;
        }
        let stride = self.stride();
        Some(UVec2::new(index % stride, index / stride))
    }

    /// Top-left sheet pixel of the tile at `index`.
    pub fn tile_to_pixel(&self, index: u32) -> Option<UVec2> {
        self.tile_of_index(index).map(|tile| tile * self.tile_size)
    }

    /// Resolve the tile under a sheet pixel.
    /// Pixels outside the sheet, or in a partial column/row at its right or
    /// bottom edge, are out of bounds.
    pub fn resolve_tile(&self, pixel: UVec2) -> Option<TileHit> {
        if pixel.x >= self.sheet_size.x || pixel.y >= self.sheet_size.y {
            return None;
        }
        let tile = pixel / self.tile_size.max(UVec2::ONE);
        let index = self.index_of(tile)?;
        Some(TileHit { tile, index })
    }

    /// Step from `tile` by `delta`. None when the result leaves the grid.
    pub fn offset_tile(&self, tile: UVec2, delta: IVec2) -> Option<UVec2> {
        let x = tile.x.checked_add_signed(delta.x)?;
        let y = tile.y.checked_add_signed(delta.y)?;
        let moved = UVec2::new(x, y);
        self.contains_tile(moved).then_some(moved)
    }
}

/// Map a tile position from one sheet's grid onto another sheet packed in the
/// same image by scaling with the tile sizes. Only lands on a meaningful
/// sprite when the tile sizes divide each other.
pub fn remap_tile(tile: UVec2, from_tile_size: UVec2, to_tile_size: UVec2) -> UVec2 {
    (tile * from_tile_size) / to_tile_size.max(UVec2::ONE)
}

/// Client-space box of a rendered atlas image (from `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl ImageRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Pointer position relative to the element, or None when the pointer is
    /// outside the box. Happens at image edges due to sub-pixel rendering.
    pub fn local_point(&self, client: Vec2) -> Option<Vec2> {
        let local = client - self.min;
        let inside = local.x >= 0.0
            && local.y >= 0.0
            && local.x < self.size.x
            && local.y < self.size.y;
        inside.then_some(local)
    }

    /// Element size in sheet pixels.
    pub fn sheet_size(&self, scale: f32) -> UVec2 {
        floor_to_sheet(self.size, scale)
    }
}

/// Element-local position in sheet pixels.
pub fn sheet_pixel(local: Vec2, scale: f32) -> UVec2 {
    floor_to_sheet(local, scale)
}

fn floor_to_sheet(v: Vec2, scale: f32) -> UVec2 {
    let scaled = (v / scale).floor().max(Vec2::ZERO);
    UVec2::new(scaled.x as u32, scaled.y as u32)
}

/// Element-relative CSS box of the highlight rectangle over one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl HighlightRect {
    pub fn for_tile(tile: UVec2, tile_size: UVec2, scale: f32) -> Self {
        let origin = (tile * tile_size).as_vec2() * scale;
        let size = tile_size.as_vec2() * scale;
        Self {
            left: origin.x,
            top: origin.y,
            width: size.x,
            height: size.y,
        }
    }

    /// Inline style for the highlight element.
    pub fn to_css(&self) -> String {
        format!(
            "width:{}px;height:{}px;left:{}px;top:{}px",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Page scroll offset that vertically centres a sprite in the viewport.
///
/// `image_top` is the client-space top of the image, `pixel_y` the sprite's
/// top in sheet pixels and `tile_height` its height in sheet pixels.
pub fn centered_scroll_y(
    scroll_y: f32,
    image_top: f32,
    pixel_y: u32,
    tile_height: u32,
    viewport_height: f32,
    scale: f32,
) -> f32 {
    let sprite_top = pixel_y as f32 * scale;
    scroll_y + image_top + sprite_top - (viewport_height - tile_height as f32 * scale) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hero() -> SheetGeometry {
        // 4 columns, 3 rows of 32x32 tiles
        SheetGeometry::new(UVec2::new(32, 32), UVec2::new(128, 96))
    }

    #[test]
    fn stride_and_rows() {
        let g = hero();
        assert_eq!(g.stride(), 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.tile_count(), 12);
    }

    #[test]
    fn first_tile_covers_its_pixels() {
        let g = hero();
        for y in 0..32 {
            for x in 0..32 {
                let hit = g.resolve_tile(UVec2::new(x, y)).unwrap();
                assert_eq!(hit.tile, UVec2::ZERO);
                assert_eq!(hit.index, 0);
            }
        }
        let next = g.resolve_tile(UVec2::new(32, 0)).unwrap();
        assert_eq!(next.tile, UVec2::new(1, 0));
    }

    #[test]
    fn single_column_sheet_has_no_second_column() {
        let g = SheetGeometry::new(UVec2::new(32, 32), UVec2::new(32, 64));
        assert!(g.resolve_tile(UVec2::new(32, 0)).is_none());
    }

    #[test]
    fn partial_trailing_column_is_out_of_bounds() {
        let g = SheetGeometry::new(UVec2::new(32, 32), UVec2::new(100, 64));
        assert_eq!(g.stride(), 3);
        assert!(g.resolve_tile(UVec2::new(99, 0)).is_none());
        assert!(g.resolve_tile(UVec2::new(95, 63)).is_some());
    }

    #[test]
    fn index_five_is_second_row_second_column() {
        let g = hero();
        assert_eq!(g.tile_of_index(0x05), Some(UVec2::new(1, 1)));
        assert_eq!(g.tile_to_pixel(0x05), Some(UVec2::new(32, 32)));
        assert_eq!(g.tile_of_index(12), None);
    }

    #[test]
    fn offset_rejects_leaving_grid() {
        let g = hero();
        assert_eq!(g.offset_tile(UVec2::ZERO, IVec2::new(-1, 0)), None);
        assert_eq!(g.offset_tile(UVec2::new(3, 0), IVec2::new(1, 0)), None);
        assert_eq!(g.offset_tile(UVec2::new(3, 2), IVec2::new(0, 1)), None);
        assert_eq!(
            g.offset_tile(UVec2::new(1, 1), IVec2::new(0, -1)),
            Some(UVec2::new(1, 0))
        );
    }

    #[test]
    fn remap_scales_by_tile_size() {
        // 32px static tiles onto 8px animated frames
        assert_eq!(
            remap_tile(UVec2::new(1, 2), UVec2::new(32, 32), UVec2::new(8, 8)),
            UVec2::new(4, 8)
        );
        // and back, flooring
        assert_eq!(
            remap_tile(UVec2::new(5, 9), UVec2::new(8, 8), UVec2::new(32, 32)),
            UVec2::new(1, 2)
        );
    }

    #[test]
    fn local_point_bounds() {
        let rect = ImageRect::new(10.0, 20.0, 64.0, 32.0);
        assert_eq!(rect.local_point(Vec2::new(10.0, 20.0)), Some(Vec2::ZERO));
        assert!(rect.local_point(Vec2::new(74.0, 30.0)).is_none());
        assert!(rect.local_point(Vec2::new(9.5, 30.0)).is_none());
        assert_eq!(rect.sheet_size(2.0), UVec2::new(32, 16));
    }

    #[test]
    fn sheet_pixel_floors() {
        assert_eq!(sheet_pixel(Vec2::new(63.9, 1.5), 2.0), UVec2::new(31, 0));
    }

    #[test]
    fn highlight_css() {
        let rect = HighlightRect::for_tile(UVec2::new(1, 1), UVec2::new(32, 32), 2.0);
        assert_eq!(rect.to_css(), "width:64px;height:64px;left:64px;top:64px");
    }

    #[test]
    fn scroll_centres_sprite() {
        // image top at 100, sprite at sheet y=32 scaled x2, 64px tall in a 600px viewport
        let y = centered_scroll_y(0.0, 100.0, 32, 32, 600.0, 2.0);
        assert_eq!(y, 100.0 + 64.0 - (600.0 - 64.0) / 2.0);
    }

    proptest! {
        #[test]
        fn index_round_trips_through_pixels(
            tw in 1u32..64,
            th in 1u32..64,
            stride in 1u32..32,
            rows in 1u32..32,
            pick in any::<u32>(),
        ) {
            let g = SheetGeometry::new(UVec2::new(tw, th), UVec2::new(tw * stride, th * rows));
            let index = pick % g.tile_count();
            let pixel = g.tile_to_pixel(index).unwrap();
            let hit = g.resolve_tile(pixel).unwrap();
            prop_assert_eq!(hit.index, index);
            prop_assert_eq!(Some(hit.tile), g.tile_of_index(index));

            // the far corner of the tile resolves to the same tile
            let corner = pixel + UVec2::new(tw - 1, th - 1);
            prop_assert_eq!(g.resolve_tile(corner).map(|h| h.index), Some(index));
        }
    }
}
