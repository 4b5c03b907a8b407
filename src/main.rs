// src/main.rs
//
// Demo window for canvio: draws a procedural pattern, a few primitives and
// some turtle stars through a nannou-backed surface.
// Press S to render the same scene into a PNG under the output directory.

use log::{error, info, warn};
use nannou::image::Rgba;
use nannou::prelude::*;
use rand::seq::SliceRandom;
use std::error::Error;
use std::path::PathBuf;

use canvio::{
    config::Config,
    draw,
    models::parse_color,
    painter::Image,
    surface::{DrawSurface, RasterSurface, Surface},
    Position, Turtle,
};

const PALETTE: &[&str] = &[
    "crimson",
    "dodgerblue",
    "gold",
    "teal",
    "violet",
    "coral",
    "#2e8b57",
];
const STAR_COUNT: usize = 3;
const PATTERN_SIZE: (u32, u32) = (160, 120);

struct Model {
    config: Config,
    star_colors: Vec<String>,
    snapshot_count: u32,
}

fn main() {
    env_logger::init();
    nannou::app(model).run();
}

fn model(app: &App) -> Model {
    let config = Config::load().expect("Failed to load config file");

    app.new_window()
        .title("canvio")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .unwrap();

    let mut rng = rand::thread_rng();
    let star_colors = (0..STAR_COUNT)
        .filter_map(|_| PALETTE.choose(&mut rng))
        .map(|c| c.to_string())
        .collect();

    if let Some(url) = config.resolve_source_url() {
        info!("Snapshots will use {} as the backdrop", url);
    }

    Model {
        config,
        star_colors,
        snapshot_count: 0,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::S {
        match save_snapshot(model) {
            Ok(path) => {
                model.snapshot_count += 1;
                info!("Saved snapshot to {}", path.display());
            }
            Err(e) => error!("Failed to save snapshot: {}", e),
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    let bg = parse_color(&model.config.style.background).unwrap_or(Rgba([255, 255, 255, 255]));
    draw.background().color(rgb(
        bg[0] as f32 / 255.0,
        bg[1] as f32 / 255.0,
        bg[2] as f32 / 255.0,
    ));

    let rect = app.window_rect();
    let mut surface = DrawSurface::new(app, &draw, rect.w() as u32, rect.h() as u32)
        .with_arc_resolution(model.config.rendering.arc_resolution);

    if let Err(e) = paint_scene(&mut surface, model) {
        error!("Failed to paint scene: {}", e);
    }

    draw.to_frame(app, &frame).unwrap();
}

/// Everything on screen, drawn through whichever surface is handed in
fn paint_scene<S: Surface>(surface: &mut S, model: &Model) -> canvio::Result<()> {
    let style = &model.config.style;
    let (width, height) = (surface.width() as f32, surface.height() as f32);

    // procedural pattern in the top-left corner
    {
        let (pw, ph) = PATTERN_SIZE;
        let mut image = Image::new();
        image.init(&mut *surface, pw, ph)?;
        image.set_pattern(
            |x, _| (x * 255 / pw) as u8,
            |_, y| (y * 255 / ph) as u8,
            |x, y| (x ^ y) as u8,
            |_, _| 255,
        )?;
    }

    surface.set_line_width(style.default_stroke_weight);
    draw::set_outline_color(surface, &style.stroke_color);
    draw::set_fill_color(surface, &style.fill_color);

    surface.begin_path();
    draw::draw_circle(surface, Position::new(width * 0.75, height * 0.25), 60.0);
    draw::fill(surface);
    draw::stroke(surface);

    draw::draw_line(
        surface,
        Position::new(20.0, height - 20.0),
        Position::new(width - 20.0, height - 20.0),
    );
    draw::stroke(surface);

    // five-pointed stars walked out from the centre
    for (i, color) in model.star_colors.iter().enumerate() {
        let mut turtle = Turtle::new(&mut *surface);
        turtle.set_color(color);
        turtle.set_line_width(style.default_stroke_weight);

        turtle.pen_up();
        turtle.right(120.0 * i as f32);
        turtle.forward(90.0);
        turtle.pen_down();

        for _ in 0..5 {
            turtle.forward(70.0);
            turtle.right(144.0);
        }
    }

    Ok(())
}

fn save_snapshot(model: &Model) -> Result<PathBuf, Box<dyn Error>> {
    let (width, height) = (model.config.window.width, model.config.window.height);
    let mut surface = RasterSurface::new(width, height)
        .with_arc_resolution(model.config.rendering.arc_resolution);
    surface.fill_background(&model.config.style.background);

    if let Some(url) = model.config.resolve_source_url() {
        let mut backdrop = Image::new();
        backdrop.init(&mut surface, width, height)?;
        if let Err(e) = futures::executor::block_on(backdrop.set_source(&url)) {
            warn!("Snapshot drawn without backdrop: {}", e);
        }
    }

    paint_scene(&mut surface, model)?;

    let output_dir = model.config.resolve_output_dir();
    std::fs::create_dir_all(&output_dir)?;
    let path = output_dir.join(format!("canvio_{:03}.png", model.snapshot_count));
    surface.save(&path)?;
    Ok(path)
}
