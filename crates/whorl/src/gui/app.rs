use crate::config;
use crate::events::AppEvent;
use crate::gui::menu::{self, Scene};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use whorl_core::geometry::Point;
use whorl_core::lifecycle::Deadline;

pub struct AppModel {
    pub scene: Rc<RefCell<Scene>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    Pressed(u32, Point),
    DeadlineElapsed(Deadline),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Scene, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Whorl"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "whorl-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "whorl-drawing-area",

                    add_controller = gtk::GestureClick {
                        set_button: 0, // Listen to all buttons
                        connect_pressed[sender] => move |gesture, _, x, y| {
                            // the press is ours; no default handling
                            gesture.set_state(gtk::EventSequenceState::Claimed);
                            sender.input(AppMsg::Pressed(
                                gesture.current_button(),
                                Point::new(x, y),
                            ));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (scene, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let scene = Rc::new(RefCell::new(scene));

        let model = AppModel {
            scene: scene.clone(),
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let scene_draw = scene.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &scene_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let scene_tick = scene.clone();
        widgets.drawing_area.add_tick_callback(move |area, _| {
            if scene_tick.borrow_mut().refresh(Instant::now()) {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.summon(&sender),
            AppMsg::Hide => self.dismiss(&sender),
            AppMsg::Toggle => {
                if self.visible {
                    self.dismiss(&sender);
                } else {
                    self.summon(&sender);
                }
            }
            AppMsg::Pressed(button, point) => {
                if !self.visible {
                    return;
                }
                if button == gdk::BUTTON_SECONDARY {
                    // context-menu press: open, or re-anchor if already open
                    let deadlines = self.scene.borrow_mut().menu.open_at(point);
                    self.schedule(deadlines, &sender);
                } else if let Some(deadlines) = self.scene.borrow_mut().menu.pointer_down(point) {
                    self.schedule(deadlines, &sender);
                }
                self.redraw();
            }
            AppMsg::DeadlineElapsed(deadline) => {
                if !self.scene.borrow_mut().menu.deadline_fired(deadline) {
                    return;
                }
                let idle = {
                    let scene = self.scene.borrow();
                    !scene.menu.is_open() && !scene.menu.any_mounted()
                };
                if idle {
                    self.visible = false;
                }
                self.redraw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match config::build_menu(&new_config) {
                    Ok(new_menu) => {
                        self.scene.borrow_mut().reconfigure(new_menu);
                        self.visible = false;
                        self.redraw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Rejected reloaded config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn summon(&mut self, sender: &ComponentSender<Self>) {
        self.visible = true;

        let cursor = window::get_cursor_position(&self.root).unwrap_or_default();
        let deadlines = self.scene.borrow_mut().menu.open_at(cursor);

        if !self.scene.borrow().menu.is_open() {
            // empty catalog: nothing to show, drop the blank overlay
            self.visible = false;
            return;
        }
        self.schedule(deadlines, sender);
        self.redraw();
    }

    fn dismiss(&mut self, sender: &ComponentSender<Self>) {
        let deadlines = self.scene.borrow_mut().menu.close();
        if deadlines.is_empty() && !self.scene.borrow().menu.any_mounted() {
            self.visible = false;
        }
        self.schedule(deadlines, sender);
        self.redraw();
    }

    fn schedule(&self, deadlines: Vec<Deadline>, sender: &ComponentSender<Self>) {
        // sources are fire-and-forget; superseded deadlines die at delivery
        // against the item's generation counter
        for deadline in deadlines {
            let sender = sender.clone();
            glib::timeout_add_local_once(deadline.after, move || {
                sender.input(AppMsg::DeadlineElapsed(deadline));
            });
        }
    }

    fn redraw(&self) {
        self.scene.borrow_mut().refresh(Instant::now());
        self.drawing_area.queue_draw();
    }
}
