use std::f32::consts::PI;
use std::path::Path;

use engine::{rgb, with_alpha, AssetKey, AssetStore, Canvas, Color, Image, Point, Rect};
use tracing::info;

use super::config::{
    palette, ModuleId, ASSISTANT_SPRITE, HEART_EMPTY, HEART_FULL, PLAYER_SPRITE, PORTAL_SPRITE,
    SPACE_BACKGROUND, VILLAGE_BACKGROUND,
};

const STAR_SEED: u64 = 42;
const STAR_COUNT: usize = 200;
const HEART_OUTLINE: [(i32, i32); 10] = [
    (15, 8),
    (20, 3),
    (25, 3),
    (28, 8),
    (28, 12),
    (15, 27),
    (2, 12),
    (2, 8),
    (5, 3),
    (10, 3),
];

/// Scans `root`, then backfills every well-known image that is still missing.
pub(crate) fn load_assets(root: &Path) -> AssetStore {
    let mut store = AssetStore::new();
    let report = store.scan(root);
    let generated = backfill_placeholders(&mut store);
    info!(
        images = store.image_count(),
        sounds = store.sound_count(),
        failures = report.failures,
        placeholders = generated,
        "assets_loaded"
    );
    store
}

fn backfill_placeholders(store: &mut AssetStore) -> usize {
    let mut generated = 0;
    for module in ModuleId::ALL {
        let color = module.info().color;
        generated += usize::from(store.insert_placeholder(module.icon_key(), || module_icon(color)));
    }
    let generators: [(AssetKey, fn() -> Image); 7] = [
        (HEART_FULL, || heart(palette::RED)),
        (HEART_EMPTY, || heart(rgb(80, 80, 80))),
        (PLAYER_SPRITE, player),
        (PORTAL_SPRITE, portal),
        (ASSISTANT_SPRITE, assistant),
        (VILLAGE_BACKGROUND, village_background),
        (SPACE_BACKGROUND, space_background),
    ];
    for (key, generate) in generators {
        generated += usize::from(store.insert_placeholder(key, generate));
    }
    generated
}

fn module_icon(color: Color) -> Image {
    let mut canvas = Canvas::new(100, 100);
    let center = Point::new(50, 50);
    canvas.fill_circle(center, 45, color);
    canvas.stroke_circle(center, 35, palette::WHITE, 3);
    canvas.into_image()
}

fn heart(color: Color) -> Image {
    let mut canvas = Canvas::new(30, 30);
    draw_heart(&mut canvas, Point::new(0, 0), color);
    canvas.into_image()
}

pub(crate) fn draw_heart(canvas: &mut Canvas, top_left: Point, color: Color) {
    let points: Vec<Point> = HEART_OUTLINE
        .iter()
        .map(|&(x, y)| top_left.offset(x, y))
        .collect();
    canvas.fill_polygon(&points, color);
    canvas.stroke_polygon(&points, palette::WHITE, 1);
}

fn player() -> Image {
    let mut canvas = Canvas::new(64, 64);
    canvas.fill_rect(Rect::new(20, 25, 24, 30), palette::ORANGE);
    canvas.fill_rect(Rect::new(22, 30, 20, 20), rgb(80, 80, 200));
    canvas.fill_circle(Point::new(32, 18), 14, rgb(255, 220, 180));
    canvas.fill_ellipse(Rect::new(18, 4, 28, 18), rgb(50, 200, 100));
    canvas.into_image()
}

fn portal() -> Image {
    let mut canvas = Canvas::new(120, 150);
    for ring in 0..5 {
        let alpha = (255 - ring * 40) as u8;
        canvas.stroke_ellipse(
            Rect::new(10 + ring * 5, 10 + ring * 5, 100 - ring * 10, 130 - ring * 10),
            with_alpha(rgb(100, 150, 255), alpha),
            3,
        );
    }
    canvas.into_image()
}

fn assistant() -> Image {
    let mut canvas = Canvas::new(80, 80);
    canvas.fill_circle(Point::new(40, 30), 20, rgb(255, 200, 180));
    canvas.fill_ellipse(Rect::new(20, 10, 40, 25), rgb(139, 69, 19));
    canvas.fill_rect(Rect::new(25, 45, 30, 30), rgb(100, 200, 100));
    canvas.into_image()
}

fn village_background() -> Image {
    let mut canvas = Canvas::new(1280, 720);
    canvas.clear(rgb(200, 200, 220));
    let points = hexagon_points(Point::new(640, 360), 350.0);
    canvas.fill_polygon(&points, palette::WOOD);
    canvas.stroke_polygon(&points, rgb(100, 60, 30), 5);
    canvas.into_image()
}

fn space_background() -> Image {
    let mut canvas = Canvas::new(1280, 720);
    canvas.clear(palette::SPACE_DARK);
    let mut rng = XorShift::new(STAR_SEED);
    for _ in 0..STAR_COUNT {
        let x = rng.range_inclusive(0, 1280);
        let y = rng.range_inclusive(0, 720);
        let size = rng.range_inclusive(1, 3);
        let brightness = rng.range_inclusive(150, 255) as u8;
        canvas.fill_circle(
            Point::new(x, y),
            size,
            rgb(brightness, brightness, brightness),
        );
    }
    canvas.into_image()
}

pub(crate) fn hexagon_points(center: Point, size: f32) -> Vec<Point> {
    (0..6)
        .map(|i| {
            let angle = PI / 3.0 * i as f32 - PI / 6.0;
            Point::new(
                center.x + (size * angle.cos()).round() as i32,
                center.y + (size * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// xorshift64; fixed seeds keep generated art identical between runs.
#[derive(Debug, Clone)]
pub(crate) struct XorShift {
    state: u64,
}

impl XorShift {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x & 0xFFFF_FFFF) as u32
    }

    pub(crate) fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        let span = (high - low + 1).max(1) as u32;
        low + (self.next_u32() % span) as i32
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn well_known_keys() -> Vec<AssetKey> {
        let mut keys: Vec<AssetKey> = ModuleId::ALL.into_iter().map(ModuleId::icon_key).collect();
        keys.extend([
            HEART_FULL,
            HEART_EMPTY,
            PLAYER_SPRITE,
            PORTAL_SPRITE,
            ASSISTANT_SPRITE,
            VILLAGE_BACKGROUND,
            SPACE_BACKGROUND,
        ]);
        keys
    }

    #[test]
    fn every_well_known_key_resolves_without_asset_files() {
        let temp = TempDir::new().expect("tempdir");
        let store = load_assets(temp.path());

        for key in well_known_keys() {
            assert!(store.image(&key).is_some(), "missing {key}");
        }
        assert_eq!(store.image(&HEART_FULL).map(Image::size), Some((30, 30)));
        assert_eq!(
            store.image(&SPACE_BACKGROUND).map(Image::size),
            Some((1280, 720))
        );
    }

    #[test]
    fn real_asset_is_not_replaced_by_placeholder() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("images/characters/player.png");
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        image::RgbaImage::new(7, 9).save(&path).expect("save png");

        let store = load_assets(temp.path());
        assert_eq!(store.image(&PLAYER_SPRITE).map(Image::size), Some((7, 9)));
    }

    #[test]
    fn generated_art_is_deterministic() {
        assert_eq!(space_background(), space_background());
        assert_eq!(village_background(), village_background());
        assert_eq!(module_icon(palette::GOLD), module_icon(palette::GOLD));
    }

    #[test]
    fn heart_colors_fill_the_center() {
        let full = heart(palette::RED);
        let empty = heart(rgb(80, 80, 80));
        assert_eq!(full.pixel(15, 15), Some(palette::RED));
        assert_eq!(empty.pixel(15, 15), Some(rgb(80, 80, 80)));
        assert_eq!(full.pixel(0, 29).map(|p| p[3]), Some(0));
    }

    #[test]
    fn module_icon_has_white_ring() {
        let icon = module_icon(palette::GOLD);
        assert_eq!(icon.pixel(50, 50), Some(palette::GOLD));
        assert_eq!(icon.pixel(50, 50 - 34), Some(palette::WHITE));
        assert_eq!(icon.pixel(0, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn rng_range_stays_in_bounds() {
        let mut rng = XorShift::new(STAR_SEED);
        for _ in 0..1000 {
            let value = rng.range_inclusive(150, 255);
            assert!((150..=255).contains(&value));
        }
    }
}
