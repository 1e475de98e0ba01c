// WGF
// copyright zipxing@hotmail.com 2022～2025

use std::{cell::RefCell, rc::Rc};
use wgf::{
    context::Context,
    event::{Event, KeyCode, KeyEvent},
    game::GameWindow,
    render::{adapter::HeadlessAdapter, Rgb, Surface},
    scene::{Node, Scene},
    util::Size,
};

type Game = GameWindow<Vec<String>>;
type Ctx = Context<Vec<String>>;

fn game(script: Vec<Vec<Event>>) -> Game {
    let mut g = GameWindow::with_adapter("it", vec![], Box::new(HeadlessAdapter::with_script(script)));
    g.clock_speed = 1000;
    g
}

fn headless(g: &mut Game) -> &mut HeadlessAdapter {
    g.adapter.as_any().downcast_mut::<HeadlessAdapter>().unwrap()
}

fn logged_scene(name: &str) -> Scene<Ctx> {
    let mut s = Scene::new(name);
    let (a, b, c) = (name.to_string(), name.to_string(), name.to_string());
    s.on_show(move |_, ctx: &mut Ctx| ctx.shared.push(format!("{}:show", a)))
        .on_update(move |_, ctx: &mut Ctx| ctx.shared.push(format!("{}:update", b)))
        .on_hide(move |_, ctx: &mut Ctx| ctx.shared.push(format!("{}:hide", c)));
    s
}

#[test]
fn tasks_run_before_the_scene_tree() {
    let mut g = game(vec![]);
    g.tree.add(logged_scene("main"), true);
    g.ctx
        .tasks
        .task("tick", |ctx: &mut Ctx| ctx.shared.push("task".to_string()));
    g.on_tick(16).unwrap();
    g.on_tick(16).unwrap();
    assert_eq!(
        g.ctx.shared,
        vec!["task", "main:show", "main:update", "task", "main:update"]
    );
}

#[test]
fn switch_requested_from_a_scene_applies_after_update() {
    let mut g = game(vec![]);
    let mut title = logged_scene("title");
    title.on_update(|_, ctx: &mut Ctx| {
        ctx.shared.push("title:update".into());
        if ctx.events.iter().any(|e| e.is_key(KeyCode::Enter)) {
            ctx.switch_scene("play");
        }
    });
    g.tree.add(title, true);
    g.tree.add(logged_scene("play"), false);

    g.on_tick(16).unwrap();
    assert_eq!(g.tree.current(), Some("title"));

    g.ctx.shared.clear();
    g.push_event(Event::Key(KeyEvent::from(KeyCode::Enter)));
    g.on_tick(16).unwrap();
    assert_eq!(g.tree.current(), Some("play"));
    assert_eq!(g.ctx.shared, vec!["title:update", "title:hide", "play:show"]);

    g.ctx.show_previous();
    g.ctx.shared.clear();
    g.on_tick(16).unwrap();
    assert_eq!(g.tree.current(), Some("title"));
    assert_eq!(g.ctx.shared, vec!["play:update", "play:hide", "title:show"]);
}

#[test]
fn run_returns_on_scripted_quit() {
    let mut g = game(vec![vec![], vec![], vec![Event::Quit]]);
    g.tree.add(logged_scene("main"), true);
    g.init().unwrap();
    g.run().unwrap();
    assert!(!g.is_active());
    assert!(headless(&mut g).was_reset);
    assert_eq!(headless(&mut g).pending(), 0);
}

#[test]
fn run_returns_when_the_context_quits() {
    let mut g = game(vec![]);
    let mut main = Scene::new("main");
    main.on_update(|_, ctx: &mut Ctx| {
        if ctx.stage >= 3 {
            ctx.quit();
        }
    });
    g.tree.add(main, true);
    g.init().unwrap();
    g.run().unwrap();
    assert_eq!(g.ctx.stage, 3);
    assert_eq!(headless(&mut g).presented, 3);
}

#[test]
fn timed_task_fires_on_frame_time() {
    let mut g = game(vec![]);
    let fired = Rc::new(RefCell::new(0));
    let f = fired.clone();
    g.ctx.tasks.timed_task("spin", 100, move |_: &mut Ctx| {
        *f.borrow_mut() += 1;
    });
    for _ in 0..10 {
        g.on_tick(30).unwrap();
    }
    assert_eq!(*fired.borrow(), 3);
}

#[test]
fn do_later_runs_once() {
    let mut g = game(vec![]);
    g.ctx.do_later(50, |ctx| ctx.shared.push("later".into()));
    g.on_tick(30).unwrap();
    assert!(g.ctx.shared.is_empty());
    g.on_tick(30).unwrap();
    g.on_tick(30).unwrap();
    assert_eq!(g.ctx.shared, vec!["later"]);
    assert_eq!(g.ctx.tasks.queued(), 0);
}

#[test]
fn sprites_follow_the_camera() {
    let mut g = game(vec![]);
    g.configure(Some(Size::new(10, 10)), None, &[]).unwrap();
    let mut s = Scene::new("s");
    let dot = wgf::render::Sprite::new(
        Rc::new(Surface::filled(Size::new(1, 1), Rgb::WHITE)),
        wgf::util::Point::new(5, 5),
    )
    .with_align(wgf::render::Align::TopLeft)
    .with_distance(1.0);
    s.insert_child("dot", Node::new("dot").with_sprite(dot).into());
    if let Some(n) = s.node_mut("dot") {
        n.initialized = true;
        n.shown = true;
        n.active = true;
    }
    g.tree.add(s, true);
    g.ctx.camera.move_by(-2, -1);
    g.on_tick(16).unwrap();
    let frame = headless(&mut g).last_frame.clone().unwrap();
    assert_eq!(frame.pixel(3, 4).unwrap().rgb(), Rgb::WHITE);
    assert_eq!(frame.pixel(5, 5).unwrap().alpha, 0);
}
