use arboard::Clipboard;
use log::{info, warn};
use macroquad::prelude::*;
use macroquad::window::Conf;
use std::path::Path;
use waypoint_planner::config::{Config, TargetsConfig, DEFAULT_CONFIG_PATH};
use waypoint_planner::session::{init_logging, load_grid, plan_grid, prepare_grid, write_outputs};
use waypoint_planner::targets::place_random_targets;
use waypoint_planner::{Cell, CellKind, Grid, PathOverlay, RoutePlan, RouteReport, Scenario};

const SCENARIO_PATH: &str = "scenario.json";
const INFO_HEIGHT: f32 = 120.0;

/// Run the planner once without opening the render loop
fn run_headless(config: &Config) {
    let result = prepare_grid(config).and_then(|grid| {
        let (plan, report) = plan_grid(&grid, &config.planner)?;
        println!("{}", report.summary());
        println!("{}", PathOverlay::new(&grid, &plan.path).render_ascii());
        write_outputs(&report, config)
    });
    if let Err(e) = result {
        eprintln!("Planning failed: {}", e);
    }
}

/// Visualization state
struct VisState {
    config: Config,
    grid: Grid,
    plan: Option<RoutePlan>,
    report: Option<RouteReport>,
    /// Number of route cells revealed so far
    revealed: usize,
    last_step: f64,
    paused: bool,
}

impl VisState {
    fn new(config: Config) -> Self {
        let grid = prepare_grid(&config).unwrap_or_else(|e| {
            warn!("Falling back to the classic maze: {}", e);
            Grid::classic_maze()
        });

        let mut state = VisState {
            config,
            grid,
            plan: None,
            report: None,
            revealed: 0,
            last_step: 0.0,
            paused: false,
        };
        state.replan();
        state
    }

    fn replan(&mut self) {
        self.revealed = 0;
        self.last_step = get_time();
        match plan_grid(&self.grid, &self.config.planner) {
            Ok((plan, report)) => {
                println!("{}", report.summary());
                self.plan = Some(plan);
                self.report = Some(report);
            }
            Err(e) => {
                warn!("Planning failed: {}", e);
                self.plan = None;
                self.report = None;
            }
        }
    }

    fn reroll_targets(&mut self) {
        let targets = TargetsConfig {
            randomize: true,
            ..self.config.targets.clone()
        };
        match place_random_targets(&mut self.grid, &targets) {
            Ok(_) => self.replan(),
            Err(e) => warn!("Could not place targets: {}", e),
        }
    }

    fn cell_at(&self, mouse_x: f32, mouse_y: f32) -> Option<Cell> {
        let size = self.config.visual.cell_size;
        let y = mouse_y - INFO_HEIGHT;
        if mouse_x < 0.0 || y < 0.0 {
            return None;
        }
        let cell = Cell::new((y / size) as usize, (mouse_x / size) as usize);
        self.grid.in_bounds(cell).then_some(cell)
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let Some(cell) = self.cell_at(mouse_x, mouse_y) else {
            return;
        };

        // Left click: toggle wall
        if is_mouse_button_pressed(MouseButton::Left) {
            let toggled = match self.grid.kind(cell) {
                CellKind::Free => CellKind::Blocked,
                CellKind::Blocked => CellKind::Free,
                _ => return,
            };
            self.grid.set_kind(cell, toggled);
            self.replan();
        }
        // Right click: move start
        else if is_mouse_button_pressed(MouseButton::Right) && self.grid.kind(cell) == CellKind::Free {
            self.grid.move_start(cell);
            self.replan();
        }
    }

    fn advance_animation(&mut self) {
        let Some(plan) = &self.plan else {
            return;
        };
        let interval = self.config.visual.step_interval_ms as f64 / 1000.0;
        let now = get_time();
        if !self.paused && self.revealed < plan.path.len() && now - self.last_step >= interval {
            self.revealed += 1;
            self.last_step = now;
        }
    }

    fn copy_to_clipboard(&self) {
        let Some(report) = &self.report else {
            println!("Nothing to copy yet");
            return;
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(report.to_text()) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Route report copied to clipboard!");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                println!("Failed to read clipboard: {}", e);
                return;
            }
        };
        match Grid::from_layout(&text) {
            Ok(grid) if grid.start().is_some() => {
                info!("Pasted {}x{} layout", grid.rows, grid.cols);
                self.grid = grid;
                if self.grid.goals().is_empty() {
                    self.reroll_targets();
                } else {
                    self.replan();
                }
            }
            Ok(_) => println!("Pasted layout has no start cell 'S'"),
            Err(e) => println!("Clipboard does not hold a layout: {}", e),
        }
    }

    fn save_scenario(&self) {
        let result = Scenario::from_grid(&self.grid).and_then(|s| s.save_to_file(SCENARIO_PATH));
        match result {
            Ok(()) => println!("Scenario saved to {}", SCENARIO_PATH),
            Err(e) => println!("Failed to save scenario: {}", e),
        }
    }

    fn write_report(&self) {
        if let Some(report) = &self.report {
            if let Err(e) = write_outputs(report, &self.config) {
                println!("Failed to write report: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(30, 30, 30, 255));

        let size = self.config.visual.cell_size;
        let revealed: &[Cell] = match &self.plan {
            Some(plan) => &plan.path[..self.revealed.min(plan.path.len())],
            None => &[],
        };
        let overlay = PathOverlay::new(&self.grid, revealed);

        // Draw grid cells
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let cell = Cell::new(row, col);
                let px = col as f32 * size;
                let py = INFO_HEIGHT + row as f32 * size;

                let color = if overlay.is_marked(cell) {
                    GOLD
                } else {
                    match self.grid.kind(cell) {
                        CellKind::Blocked => LIME,
                        CellKind::Free => WHITE,
                        CellKind::Start => RED,
                        CellKind::Goal => BLUE,
                    }
                };
                draw_rectangle(px, py, size - 1.0, size - 1.0, color);

                if self.config.visual.show_cell_numbers {
                    let label = cell.cell_number(self.grid.cols).to_string();
                    draw_text(&label, px + 2.0, py + size * 0.6, size * 0.35, DARKGRAY);
                }
            }
        }

        // Draw info
        let status = match &self.report {
            Some(report) if report.is_feasible() => format!(
                "Cost: {}  Expanded: {}  Targets: {}  Step {}/{}",
                report.total_cost,
                report.nodes_expanded,
                report.target_count,
                self.revealed,
                report.total_cost
            ),
            Some(_) => "No feasible route".to_string(),
            None => "Planning failed".to_string(),
        };
        draw_text(&status, 10.0, 20.0, 20.0, WHITE);
        draw_text(
            "Left click: toggle wall  Right click: move start  R: new targets  P: replan",
            10.0,
            45.0,
            18.0,
            LIGHTGRAY,
        );
        draw_text(
            "Space: pause  C: copy report  V: paste layout  S: save scenario  W: write report  Esc: close",
            10.0,
            68.0,
            18.0,
            LIGHTGRAY,
        );
    }
}

fn window_conf() -> Conf {
    // Runs before the logger; diagnostics are reported again from main
    let (config, _) = Config::read(DEFAULT_CONFIG_PATH);
    let grid = load_grid(&config.maze).unwrap_or_else(|_| Grid::classic_maze());
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (grid.cols as f32 * config.visual.cell_size) as i32,
        window_height: (INFO_HEIGHT + grid.rows as f32 * config.visual.cell_size) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, source) = Config::read(DEFAULT_CONFIG_PATH);
    init_logging(&config.logging);
    source.report(Path::new(DEFAULT_CONFIG_PATH));

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--report" {
        run_headless(&config);
        return;
    }

    let mut state = VisState::new(config);

    loop {
        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::R) {
            state.reroll_targets();
        }
        if is_key_pressed(KeyCode::P) {
            state.replan();
        }
        if is_key_pressed(KeyCode::Space) {
            state.paused = !state.paused;
        }
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            state.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            state.save_scenario();
        }
        if is_key_pressed(KeyCode::W) {
            state.write_report();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.advance_animation();
        state.draw();

        next_frame().await
    }
}
