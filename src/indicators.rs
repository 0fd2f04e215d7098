//! Loading spinner and message dialog shared by every page.

use std::rc::Rc;

use yew::prelude::*;

/// Progress and error reporting handle passed to services.
pub trait Feedback {
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_message(&self, message: String);
    fn hide_message(&self);
    /// Blocking notice for input the user has to fix right away.
    fn alert(&self, message: &str);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadingState {
    pub visible: bool,
}

pub enum LoadingAction {
    Show,
    Hide,
}

impl Reducible for LoadingState {
    type Action = LoadingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let visible = matches!(action, LoadingAction::Show);
        if visible == self.visible {
            return self;
        }
        Rc::new(Self { visible })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageState {
    pub message: Option<String>,
}

pub enum MessageAction {
    Show(String),
    Hide,
}

impl Reducible for MessageState {
    type Action = MessageAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            MessageAction::Show(message) => Rc::new(Self {
                message: Some(message),
            }),
            MessageAction::Hide if self.message.is_none() => self,
            MessageAction::Hide => Rc::new(Self::default()),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Indicators {
    loading: UseReducerHandle<LoadingState>,
    message: UseReducerHandle<MessageState>,
}

impl Indicators {
    pub fn is_loading(&self) -> bool {
        self.loading.visible
    }

    pub fn message(&self) -> Option<String> {
        self.message.message.clone()
    }
}

#[hook]
pub fn use_indicators() -> Indicators {
    Indicators {
        loading: use_reducer(LoadingState::default),
        message: use_reducer(MessageState::default),
    }
}

impl Feedback for Indicators {
    fn show_loading(&self) {
        self.loading.dispatch(LoadingAction::Show);
    }

    fn hide_loading(&self) {
        self.loading.dispatch(LoadingAction::Hide);
    }

    fn show_message(&self, message: String) {
        self.message.dispatch(MessageAction::Show(message));
    }

    fn hide_message(&self) {
        self.message.dispatch(MessageAction::Hide);
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct IndicatorOverlayProps {
    pub indicators: Indicators,
}

#[function_component(IndicatorOverlay)]
pub fn indicator_overlay(props: &IndicatorOverlayProps) -> Html {
    let on_dismiss = {
        let indicators = props.indicators.clone();
        Callback::from(move |_: MouseEvent| indicators.hide_message())
    };

    html! {
        <>
            {
                if props.indicators.is_loading() {
                    html! {
                        <div class="fixed inset-0 z-50 flex items-center justify-center bg-gray-500/10">
                            <div class="h-16 w-16 rounded-full border-8 border-gray-200 border-t-[#173E63] animate-spin"></div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            {
                if let Some(message) = props.indicators.message() {
                    html! {
                        <div class="fixed inset-0 z-50 flex items-center justify-center bg-gray-500/10" onclick={on_dismiss.clone()}>
                            <div class="flex flex-col w-80 min-h-40 bg-white text-[#173E63] px-4 py-4 rounded-[10px] border border-border shadow-lg">
                                <p class="flex-1 text-sm">{ message }</p>
                                <div class="flex justify-end mt-4">
                                    <button class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-xs font-bold" onclick={on_dismiss}>{"OK"}</button>
                                </div>
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}
