use gtk::gdk;
use gtk4 as gtk;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.knob-drawing-area {
    background: none;
    background-color: transparent;
}

.knob-value {
    font-family: monospace;
    font-size: 14pt;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
