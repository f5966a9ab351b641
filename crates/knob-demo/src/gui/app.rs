use crate::config;
use crate::events::AppEvent;
use crate::gui::{painter, theme, window_opacity};
use gtk::prelude::*;
use gtk4 as gtk;
use knob::{DisplayList, Knob, KnobConfig, KnobError, Point, PointerEvent, TurnType};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub knob: Rc<RefCell<Knob<DisplayList>>>,
    pub value: f64,
    pub size: i32,
    pub title: String,
    /// Turn type given on the command line, wins over the config file.
    pub turn_type: Option<TurnType>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    ValueChanged(f64),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

pub fn build_knob(
    config: &KnobConfig,
    turn_type: Option<TurnType>,
) -> Result<Knob<DisplayList>, KnobError> {
    let mut config = config.clone();
    if let Some(turn_type) = turn_type {
        config.turn_type = turn_type;
    }
    Knob::new(&config, DisplayList::new())
}

fn forward_changes(knob: &mut Knob<DisplayList>, sender: &ComponentSender<AppModel>) {
    let sender = sender.clone();
    knob.connect_value_changed(move |value| sender.input(AppMsg::ValueChanged(value)));
}

impl AppModel {
    /// Drawing area coordinates plus where the area sits inside the window.
    fn pointer_event(&self, local: Point) -> PointerEvent {
        let origin = self
            .drawing_area
            .compute_point(&self.root, &gtk::graphene::Point::new(0.0, 0.0))
            .map(|p| Point::new(p.x() as f64, p.y() as f64))
            .unwrap_or_default();
        PointerEvent::at(local, origin)
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        config::WindowConfig,
        Knob<DisplayList>,
        Option<TurnType>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&model.title),
            #[watch]
            set_opacity: window_opacity(model.value),
            add_css_class: "knob-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_valign: gtk::Align::Center,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    #[watch]
                    set_content_width: model.size,
                    #[watch]
                    set_content_height: model.size,
                    set_halign: gtk::Align::Center,
                    add_css_class: "knob-drawing-area",

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::PointerDown(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::PointerUp(Point::new(x + dx, y + dy)));
                            }
                        }
                    }
                },

                gtk::Label {
                    add_css_class: "knob-value",
                    #[watch]
                    set_label: &format!("{:.2}", model.value),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (window_config, mut knob, turn_type, rx) = init;

        theme::load_css();
        root.set_default_size(window_config.width, window_config.height);

        forward_changes(&mut knob, &sender);

        let model = AppModel {
            value: knob.value(),
            size: knob.size().ceil() as i32,
            title: window_config.title,
            turn_type,
            knob: Rc::new(RefCell::new(knob)),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let knob_draw = model.knob.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = painter::paint(cr, knob_draw.borrow().canvas()) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerDown(local) => {
                let event = self.pointer_event(local);
                self.knob.borrow_mut().pointer_down(event);
            }
            AppMsg::PointerMove(local) => {
                let event = self.pointer_event(local);
                let moved = self.knob.borrow_mut().pointer_move(event);
                match moved {
                    Ok(true) => self.drawing_area.queue_draw(),
                    Ok(false) => {}
                    Err(e) => log::warn!("Ignoring pointer motion: {}", e),
                }
            }
            AppMsg::PointerUp(local) => {
                let event = self.pointer_event(local);
                self.knob.borrow_mut().pointer_up(event);
            }
            AppMsg::ValueChanged(value) => {
                log::debug!("Knob value {:.2}", value);
                self.value = value;
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match build_knob(&new_config.knob, self.turn_type) {
                    Ok(mut knob) => {
                        forward_changes(&mut knob, &sender);
                        self.value = knob.value();
                        self.size = knob.size().ceil() as i32;
                        self.title = new_config.window.title;
                        *self.knob.borrow_mut() = knob;
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Keeping the current knob: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_knob_applies_turn_type_override() {
        let config = KnobConfig::default();
        let knob = build_knob(&config, Some(TurnType::Dist)).unwrap();
        assert_eq!(knob.turn_type(), TurnType::Dist);

        let knob = build_knob(&config, None).unwrap();
        assert_eq!(knob.turn_type(), TurnType::Angle);
    }

    #[test]
    fn test_build_knob_rejects_invalid_config() {
        let config = KnobConfig {
            value: 150.0,
            ..KnobConfig::default()
        };
        let err = build_knob(&config, None).err().unwrap();
        assert!(err.is_invalid_argument());
    }
}
