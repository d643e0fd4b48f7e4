//! MultiSelectFilter component - выпадающий фильтр с множественным выбором.
//!
//! Меню рендерится через `Portal` в `<body>` с `position: fixed`, поэтому не
//! обрезается `overflow` контейнером таблицы. Закрывается кликом вне
//! триггера и меню или клавишей Escape; выбор пунктов меню не закрывает его.

use super::popover::{PointerTarget, PopoverController, Rect};
use super::selection::{is_all_selected, toggle_option, toggle_select_all};
use crate::shared::icons::icon;
use leptos::portal::Portal;
use leptos::prelude::*;
use std::collections::BTreeSet;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;

/// Document-level listeners that live only while the menu is open
struct DocumentListeners {
    document: web_sys::Document,
    pointer_down: EventClosure,
    key_down: EventClosure,
}

impl DocumentListeners {
    fn attach(
        on_pointer_down: impl FnMut(web_sys::Event) + 'static,
        on_key_down: impl FnMut(web_sys::Event) + 'static,
    ) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let pointer_down = Closure::wrap(Box::new(on_pointer_down) as Box<dyn FnMut(web_sys::Event)>);
        let key_down = Closure::wrap(Box::new(on_key_down) as Box<dyn FnMut(web_sys::Event)>);

        // capture phase: runs before the menu items' own handlers
        document
            .add_event_listener_with_callback_and_bool(
                "pointerdown",
                pointer_down.as_ref().unchecked_ref(),
                true,
            )
            .ok()?;
        if document
            .add_event_listener_with_callback("keydown", key_down.as_ref().unchecked_ref())
            .is_err()
        {
            let _ = document.remove_event_listener_with_callback_and_bool(
                "pointerdown",
                pointer_down.as_ref().unchecked_ref(),
                true,
            );
            return None;
        }

        Some(Self {
            document,
            pointer_down,
            key_down,
        })
    }

    fn detach(self) {
        let _ = self.document.remove_event_listener_with_callback_and_bool(
            "pointerdown",
            self.pointer_down.as_ref().unchecked_ref(),
            true,
        );
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.key_down.as_ref().unchecked_ref());
    }
}

fn to_rect(r: &web_sys::DomRect) -> Rect {
    Rect {
        top: r.y(),
        left: r.x(),
        width: r.width(),
        height: r.height(),
    }
}

#[component]
pub fn MultiSelectFilter(
    /// Варианты выбора
    #[prop(into)]
    options: Signal<Vec<String>>,

    /// Выбранные значения
    #[prop(into)]
    selected: Signal<BTreeSet<String>>,

    /// Callback с новым набором выбранных значений
    on_change: Callback<BTreeSet<String>>,

    /// Отступ меню от триггера, px
    #[prop(default = 4.0)]
    gap: f64,

    /// Текст триггера, когда ничего не выбрано
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Все".to_string()
    } else {
        placeholder
    };

    let controller = RwSignal::new(PopoverController::new(gap));
    let trigger_ref = NodeRef::<leptos::html::Button>::new();
    let menu_ref = NodeRef::<leptos::html::Div>::new();
    let listeners = StoredValue::new_local(None::<DocumentListeners>);

    // Effects run only after the component is in the DOM
    Effect::new(move |_| {
        controller.update(|c| c.mark_mounted());
    });

    let classify = move |ev: &web_sys::Event| -> PointerTarget {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
            return PointerTarget::Outside;
        };
        let in_trigger = trigger_ref
            .get_untracked()
            .is_some_and(|el| el.contains(Some(&target)));
        let in_menu = menu_ref
            .get_untracked()
            .is_some_and(|el| el.contains(Some(&target)));
        if in_trigger {
            PointerTarget::Trigger
        } else if in_menu {
            PointerTarget::Menu
        } else {
            PointerTarget::Outside
        }
    };

    Effect::new(move |_| {
        let is_open = controller.with(|c| c.is_open());
        listeners.update_value(|slot| {
            if is_open && slot.is_none() {
                *slot = DocumentListeners::attach(
                    move |ev| {
                        let target = classify(&ev);
                        let _ = controller.try_update(|c| c.on_pointer_down(target));
                    },
                    move |ev| {
                        if let Some(key_event) = ev.dyn_ref::<web_sys::KeyboardEvent>() {
                            let key = key_event.key();
                            let _ = controller.try_update(|c| c.on_key_down(&key));
                        }
                    },
                );
                if slot.is_none() {
                    log::warn!("multi-select: document listeners not attached");
                }
            } else if !is_open {
                if let Some(active) = slot.take() {
                    active.detach();
                }
            }
        });
    });

    on_cleanup(move || {
        let _ = listeners.try_update_value(|slot| {
            if let Some(active) = slot.take() {
                active.detach();
            }
        });
    });

    let toggle_open = move |_| {
        let Some(trigger) = trigger_ref.get_untracked() else {
            return;
        };
        // measured on every open, never cached
        let rect = to_rect(&trigger.get_bounding_client_rect());
        controller.update(|c| c.toggle_open(rect));
    };

    let trigger_label = move || {
        let sel = selected.get();
        match sel.len() {
            0 => placeholder.clone(),
            1 | 2 => sel.into_iter().collect::<Vec<_>>().join(", "),
            n => format!("Выбрано: {}", n),
        }
    };

    let all_selected = move || selected.with(|sel| options.with(|opts| is_all_selected(sel, opts)));

    view! {
        <div class="multi-select">
            <button
                node_ref=trigger_ref
                type="button"
                class="multi-select__trigger"
                class:multi-select__trigger--active=move || !selected.with(|s| s.is_empty())
                on:click=toggle_open
            >
                <span class="multi-select__label">{trigger_label}</span>
                {move || if controller.with(|c| c.is_open()) {
                    icon("chevron-up")
                } else {
                    icon("chevron-down")
                }}
            </button>

            <Show when=move || controller.with(|c| c.should_render_menu())>
                <Portal>
                    <div
                        node_ref=menu_ref
                        class="multi-select__menu"
                        style=move || {
                            controller.with(|c| c.menu_position().map(|p| p.to_style()).unwrap_or_default())
                        }
                    >
                        <label class="multi-select__item multi-select__item--all">
                            <input
                                type="checkbox"
                                prop:checked=all_selected
                                on:change=move |_| {
                                    let next = selected.with(|sel| {
                                        options.with(|opts| toggle_select_all(sel, opts))
                                    });
                                    on_change.run(next);
                                }
                            />
                            "Выбрать все"
                        </label>
                        <For
                            each=move || options.get()
                            key=|opt| opt.clone()
                            children=move |opt: String| {
                                let opt_for_checked = opt.clone();
                                let opt_for_change = opt.clone();
                                view! {
                                    <label class="multi-select__item">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || selected.with(|s| s.contains(&opt_for_checked))
                                            on:change=move |_| {
                                                let next = selected.with(|sel| {
                                                    options.with(|opts| toggle_option(sel, opts, &opt_for_change))
                                                });
                                                on_change.run(next);
                                            }
                                        />
                                        {opt}
                                    </label>
                                }
                            }
                        />
                    </div>
                </Portal>
            </Show>
        </div>
    }
}
