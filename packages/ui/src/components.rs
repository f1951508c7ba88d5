//! Form primitives shared by every page.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Destructive => "btn btn-destructive",
            ButtonVariant::Ghost => "btn btn-ghost",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] class: String,
    #[props(default)] disabled: bool,
    #[props(default)] title: String,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let base = variant.class();
    rsx! {
        button {
            class: "{base} {class}",
            r#type: "{r#type}",
            disabled,
            title: "{title}",
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] disabled: bool,
    #[props(default)] required: bool,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        input {
            class: "input {class}",
            id: "{id}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            required,
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Label(#[props(default)] html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "label", r#for: "{html_for}", {children} }
    }
}

/// A `<select>` over `(value, label)` pairs. An empty `value` selects the
/// placeholder entry.
#[component]
pub fn Select(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    options: Vec<(String, String)>,
    #[props(default)] value: String,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        select {
            class: "input {class}",
            id: "{id}",
            onchange: move |evt| onchange.call(evt),
            if !placeholder.is_empty() {
                option { value: "", selected: value.is_empty(), "{placeholder}" }
            }
            for (v, label) in options {
                option {
                    key: "{v}",
                    selected: v == value,
                    value: "{v}",
                    "{label}"
                }
            }
        }
    }
}

/// Labelled range input showing its current value.
#[component]
pub fn Slider(
    label: String,
    value: f32,
    #[props(default = 0.0)] min: f32,
    #[props(default = 1.0)] max: f32,
    #[props(default = 0.01)] step: f32,
    onchange: EventHandler<f32>,
) -> Element {
    rsx! {
        div { class: "slider",
            label { class: "label", "{label}: {value:.2}" }
            input {
                r#type: "range",
                min: "{min}",
                max: "{max}",
                step: "{step}",
                value: "{value}",
                oninput: move |evt: FormEvent| {
                    if let Ok(v) = evt.value().parse::<f32>() {
                        onchange.call(v);
                    }
                },
            }
        }
    }
}

/// One `label: input` pair in a form grid.
#[component]
pub fn Field(label: String, id: String, children: Element) -> Element {
    rsx! {
        div { class: "field",
            Label { html_for: id.clone(), "{label}" }
            {children}
        }
    }
}
