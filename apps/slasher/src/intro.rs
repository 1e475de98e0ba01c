// WGF
// copyright zipxing@hotmail.com 2022～2025

//! The intro scene: an enemy walking across a white screen and a
//! greatsword following the mouse to slash it.

use crate::entities::{Enemy, Greatsword};
use log::{info, warn};
use std::rc::Rc;
use wgf::{
    context::Context,
    event::MouseButton,
    render::{Rgb, Sprite, Surface},
    scene::{Label, Node, Scene},
    util::Size,
};

pub const FONT_NAME: &str = "romulus";
pub const FONT_SIZE: u32 = 36;
pub const TEXT_COLOR: Rgb = Rgb {
    red: 10,
    green: 10,
    blue: 10,
};
/// milliseconds between two enemy steps
pub const ENEMY_STEP: i64 = 16;

#[derive(Default)]
pub struct Slasher {
    pub enemy: Option<Enemy>,
    pub weapon: Option<Greatsword>,
    pub hits: u32,
}

pub type Ctx = Context<Slasher>;

/// Image from the catalog, or a flat colored stand-in when it's missing
fn image_or_placeholder(ctx: &Ctx, name: &str, size: Size, color: Rgb) -> Rc<Surface> {
    ctx.assets.image(name).unwrap_or_else(|| {
        warn!("Image '{}' not found, using a placeholder", name);
        Rc::new(Surface::filled(size, color))
    })
}

fn spawn(node: &mut Node<Ctx>, ctx: &mut Ctx) {
    let fonts = ctx.assets.config.fonts_dir().join(format!("{}.ttf", FONT_NAME));
    if let Err(e) = ctx.assets.load_font(&fonts, Some(FONT_SIZE)) {
        warn!("Unable to load font {:?}: {}", fonts, e);
    }

    let enemy = image_or_placeholder(ctx, "enemy", Size::new(8, 12), Rgb::new(200, 40, 40));
    let sword = image_or_placeholder(ctx, "greatsword", Size::new(6, 24), Rgb::new(90, 90, 110));
    ctx.shared.enemy = Some(Enemy::new(&enemy, ctx.screen.rect()));
    ctx.shared.weapon = Some(Greatsword::new(&sword));

    // later children are drawn above earlier ones
    node.add_child(ctx, Node::new("text"), true);

    let mut enemy = Node::new("enemy");
    enemy.on_update(|node, ctx: &mut Ctx| {
        node.sprite = ctx.shared.enemy.as_ref().map(|e| e.sprite());
    });
    node.add_child(ctx, enemy, true);

    let mut weapon = Node::new("weapon");
    weapon.on_update(|node, ctx: &mut Ctx| {
        let mouse = ctx.mouse;
        if let Some(w) = ctx.shared.weapon.as_mut() {
            w.update(mouse);
            node.sprite = Some(w.sprite());
        }
    });
    node.add_child(ctx, weapon, true);

    ctx.tasks.timed_task("enemy", ENEMY_STEP, |ctx: &mut Ctx| {
        if let Some(e) = ctx.shared.enemy.as_mut() {
            e.update();
        }
    });
}

fn show_text(node: &mut Node<Ctx>, ctx: &mut Ctx) {
    let center = ctx.screen.rect().center();
    let label = ctx.assets.font(FONT_NAME).map(|f| {
        Label::new(Rc::new(f.clone()), "Hello, World")
            .antialiased(false)
            .with_color(TEXT_COLOR)
    });
    match label {
        Some(label) => {
            if let Some(n) = node.node_mut("text") {
                n.sprite = Some(Sprite::new(label.surface(), center));
                n.label = Some(label);
            }
        }
        None => warn!("Font '{}' is not loaded, skipping text", FONT_NAME),
    }
    ctx.set_cursor_visible(false);
}

fn handle_input(_node: &mut Node<Ctx>, ctx: &mut Ctx) {
    let Slasher {
        enemy,
        weapon,
        hits,
    } = &mut ctx.shared;
    let (Some(enemy), Some(weapon)) = (enemy.as_mut(), weapon.as_mut()) else {
        return;
    };
    for event in ctx.events.iter() {
        if event.is_mouse_down(MouseButton::Left) {
            if weapon.hit(enemy) {
                *hits += 1;
                info!("Enemy hit, {} so far", hits);
                if let Some(sound) = ctx.assets.sound("damage") {
                    sound.play();
                }
                enemy.damaged();
            }
        } else if event.is_mouse_up(MouseButton::Left) {
            weapon.pullback();
        }
    }
}

fn leave(_node: &mut Node<Ctx>, ctx: &mut Ctx) {
    ctx.tasks.remove("enemy");
    ctx.set_cursor_visible(true);
}

pub fn intro_scene(size: Size) -> Scene<Ctx> {
    let mut sc = Scene::new("intro").with_background(Surface::filled(size, Rgb::WHITE));
    sc.on_init(spawn)
        .on_show(show_text)
        .on_update(handle_input)
        .on_hide(leave);
    sc
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgf::{
        event::{Event, MouseEvent, MouseEventKind},
        game::GameWindow,
        render::adapter::HeadlessAdapter,
        util::Point,
    };

    fn game() -> GameWindow<Slasher> {
        let mut g = GameWindow::with_adapter("slasher", Slasher::default(), Box::new(HeadlessAdapter::new()));
        g.ctx.assets.config = wgf::asset::AssetsConfig::with_directory("does-not-exist");
        g.configure(Some(Size::new(320, 240)), None, &[]).unwrap();
        let size = g.ctx.settings.get().size;
        g.tree.add(intro_scene(size), true);
        g
    }

    fn click(kind: MouseEventKind, at: Point) -> Event {
        Event::Mouse(MouseEvent::new(kind, at.x, at.y))
    }

    #[test]
    fn intro_runs_on_placeholders() {
        let mut g = game();
        g.on_tick(16).unwrap();
        assert!(g.ctx.shared.enemy.is_some());
        assert!(g.ctx.tasks.contains("enemy"));
        let intro = g.tree.get("intro").unwrap().base();
        assert_eq!(intro.len(), 3);
        // background, enemy and weapon; no font so no text
        assert_eq!(g.tree.frame().draw_list.len(), 3);
        let adapter = g.adapter.as_any().downcast_mut::<HeadlessAdapter>().unwrap();
        assert!(!adapter.cursor_visible);
    }

    #[test]
    fn slashing_the_enemy() {
        let mut g = game();
        g.on_tick(16).unwrap();
        let target = g.ctx.shared.enemy.as_ref().unwrap().rect.center();
        let at = Point::new(target.x, target.y - 10);
        g.push_event(click(MouseEventKind::Moved, at));
        g.on_tick(16).unwrap();
        g.push_event(click(MouseEventKind::Down(MouseButton::Left), at));
        g.on_tick(16).unwrap();
        assert_eq!(g.ctx.shared.hits, 1);
        assert!(g.ctx.shared.enemy.as_ref().unwrap().is_spinning());
        g.push_event(click(MouseEventKind::Up(MouseButton::Left), at));
        g.on_tick(16).unwrap();
        assert!(!g.ctx.shared.weapon.as_ref().unwrap().is_attacking());
    }
}
