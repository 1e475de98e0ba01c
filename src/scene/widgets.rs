// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Ready made nodes for text, a mouse cursor and buttons.
//!
//! A [`Label`] keeps the rendered text of a node. Changing its text renders
//! a new surface, which the node picks up on its next update. Cursor and
//! button read the mouse from the game [`Context`].

use crate::{
    context::Context,
    event::MouseButton,
    render::{font::Font, sprite::Sprite, style::Rgb, surface::Surface},
    scene::Node,
    util::{Point, Size},
};
use log::debug;
use std::{fmt, rc::Rc};

/// Anything able to turn a line of text into pixels
pub trait TextRender {
    fn render_text(&self, text: &str, antialias: bool, color: Rgb) -> Surface;
}

impl TextRender for Font {
    fn render_text(&self, text: &str, antialias: bool, color: Rgb) -> Surface {
        self.render(text, antialias, color)
    }
}

pub struct Label {
    font: Rc<dyn TextRender>,
    text: String,
    antialias: bool,
    color: Rgb,
    /// drawn behind the text from its top left corner
    frame: Option<Rc<Surface>>,
    surface: Rc<Surface>,
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text)
            .field("antialias", &self.antialias)
            .field("color", &self.color)
            .field("frame", &self.frame.is_some())
            .finish()
    }
}

impl Label {
    /// Antialiased black text
    pub fn new(font: Rc<dyn TextRender>, text: &str) -> Self {
        let surface = Rc::new(font.render_text(text, true, Rgb::BLACK));
        Self {
            font,
            text: text.to_string(),
            antialias: true,
            color: Rgb::BLACK,
            frame: None,
            surface,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self.render();
        self
    }

    pub fn antialiased(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self.render();
        self
    }

    pub fn with_frame(mut self, frame: Surface) -> Self {
        self.frame = Some(Rc::new(frame));
        self.render();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the new text, unchanged text keeps the old surface
    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.render();
    }

    pub fn set_color(&mut self, color: Rgb) {
        if self.color != color {
            self.color = color;
            self.render();
        }
    }

    pub fn surface(&self) -> Rc<Surface> {
        self.surface.clone()
    }

    fn render(&mut self) {
        let text = self.font.render_text(&self.text, self.antialias, self.color);
        let surface = match &self.frame {
            Some(frame) => {
                let size = Size::new(
                    frame.width().max(text.width()),
                    frame.height().max(text.height()),
                );
                let mut s = Surface::new(size);
                s.blit(frame, Point::new(0, 0));
                s.blit(&text, Point::new(0, 0));
                s
            }
            None => text,
        };
        debug!("label {:?} rendered at {:?}", self.text, surface.size());
        self.surface = Rc::new(surface);
    }
}

impl<S: 'static> Node<Context<S>> {
    /// Node drawing `surface` centered on the mouse every frame.
    /// It ignores the camera.
    pub fn cursor(name: &str, surface: Rc<Surface>) -> Self {
        let mut node = Self::new(name).with_sprite(Sprite::new(surface, Point::default()));
        node.on_show(follow_mouse).on_update(follow_mouse);
        node
    }

    /// Text node running its click hook when the left mouse button goes
    /// down over it. Setting another update hook turns that off, the hook
    /// can still be run with [`Node::click`].
    pub fn button<F>(name: &str, label: Label, pos: Point, on_click: F) -> Self
    where
        F: FnMut(&mut Node<Context<S>>, &mut Context<S>) + 'static,
    {
        let mut node = Self::text(name, label, pos);
        node.on_click(on_click).on_update(|node, ctx| {
            if node.is_clicked(ctx) {
                node.click(ctx);
            }
        });
        node
    }

    /// True if a left button press of this frame landed on the sprite
    pub fn is_clicked(&self, ctx: &Context<S>) -> bool {
        let Some(rect) = self.sprite.as_ref().map(|s| s.rect(&ctx.camera)) else {
            return false;
        };
        ctx.events.iter().any(|e| {
            e.is_mouse_down(MouseButton::Left)
                && e.mouse_pos()
                    .map_or(false, |(x, y)| rect.contains_point(Point::new(x, y)))
        })
    }
}

fn follow_mouse<S>(node: &mut Node<Context<S>>, ctx: &mut Context<S>) {
    if let Some(sprite) = node.sprite.as_mut() {
        sprite.pos = ctx.mouse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event::{Event, MouseEvent, MouseEventKind},
        render::draw_list::Camera,
        scene::Frame,
    };
    use std::cell::Cell;

    /// One 4x8 block per character, counting renders
    #[derive(Default)]
    struct BlockFont {
        renders: Cell<u32>,
    }

    impl TextRender for BlockFont {
        fn render_text(&self, text: &str, _antialias: bool, color: Rgb) -> Surface {
            self.renders.set(self.renders.get() + 1);
            Surface::filled(Size::new(4 * text.chars().count() as u32, 8), color)
        }
    }

    type Ctx = Context<Vec<String>>;

    fn ctx() -> Ctx {
        Context::new("widgets", vec![])
    }

    fn press(x: i32, y: i32) -> Event {
        Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y))
    }

    #[test]
    fn label_renders_only_on_change() {
        let font = Rc::new(BlockFont::default());
        let mut label = Label::new(font.clone(), "hi").with_color(Rgb::WHITE);
        let renders = font.renders.get();
        assert_eq!(label.surface().size(), Size::new(8, 8));
        label.set_text("hi");
        assert_eq!(font.renders.get(), renders);
        label.set_text("hello");
        assert_eq!(font.renders.get(), renders + 1);
        assert_eq!(label.text(), "hello");
        assert_eq!(label.surface().size(), Size::new(20, 8));
        assert_eq!(label.surface().pixel(0, 0).unwrap().rgb(), Rgb::WHITE);
    }

    #[test]
    fn label_frame_sits_behind_text() {
        let label = Label::new(Rc::new(BlockFont::default()), "ab")
            .with_color(Rgb::WHITE)
            .with_frame(Surface::filled(Size::new(12, 10), Rgb::new(0, 0, 200)));
        let s = label.surface();
        assert_eq!(s.size(), Size::new(12, 10));
        assert_eq!(s.pixel(1, 1).unwrap().rgb(), Rgb::WHITE);
        assert_eq!(s.pixel(10, 9).unwrap().rgb(), Rgb::new(0, 0, 200));
    }

    #[test]
    fn text_node_picks_up_new_text() {
        let mut c = ctx();
        let mut frame = Frame::default();
        let label = Label::new(Rc::new(BlockFont::default()), "0");
        let mut n = Node::text("score", label, Point::new(50, 50));
        n.play(&mut c);
        n.update(&mut c, &mut frame);
        assert_eq!(n.sprite.as_ref().unwrap().surface.width(), 4);
        if let Some(l) = n.label.as_mut() {
            l.set_text("100");
        }
        n.update(&mut c, &mut frame);
        let sprite = n.sprite.as_ref().unwrap();
        assert_eq!(sprite.surface.width(), 12);
        assert_eq!(sprite.pos, Point::new(50, 50));
        assert_eq!(frame.draw_list.len(), 2);
    }

    #[test]
    fn cursor_follows_mouse() {
        let mut c = ctx();
        let mut frame = Frame::default();
        let mut cur = Node::cursor("cursor", Rc::new(Surface::new(Size::new(2, 2))));
        c.mouse = Point::new(7, 9);
        cur.init(&mut c);
        cur.show(&mut c, true);
        assert_eq!(cur.sprite.as_ref().unwrap().pos, Point::new(7, 9));
        c.mouse = Point::new(30, 4);
        cur.update(&mut c, &mut frame);
        let sprite = cur.sprite.as_ref().unwrap();
        assert_eq!(sprite.rect(&Camera::new(Point::new(100, 100))).center(), Point::new(30, 4));
    }

    #[test]
    fn button_clicks_only_inside() {
        let mut c = ctx();
        let mut frame = Frame::default();
        let label = Label::new(Rc::new(BlockFont::default()), "ok");
        // 8x8 centered on (20, 20): covers 16..24
        let mut b = Node::button("ok", label, Point::new(20, 20), |node, ctx: &mut Ctx| {
            ctx.shared.push(node.name.clone());
        });
        b.play(&mut c);
        c.events = vec![press(40, 40)];
        b.update(&mut c, &mut frame);
        assert!(c.shared.is_empty());
        c.events = vec![press(17, 23)];
        b.update(&mut c, &mut frame);
        assert_eq!(c.shared, vec!["ok"]);
        c.events.clear();
        b.update(&mut c, &mut frame);
        assert_eq!(c.shared.len(), 1);
    }

    #[test]
    fn click_hook_needs_an_active_node() {
        let mut c = ctx();
        let label = Label::new(Rc::new(BlockFont::default()), "x");
        let mut b = Node::button("b", label, Point::new(0, 0), |_, ctx: &mut Ctx| {
            ctx.shared.push("clicked".into());
        });
        assert!(!b.click(&mut c));
        b.play(&mut c);
        assert!(b.click(&mut c));
        assert_eq!(c.shared, vec!["clicked"]);
    }
}
