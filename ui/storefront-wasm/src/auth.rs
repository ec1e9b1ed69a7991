//! External auth-success signal.
//!
//! The login flow lives in an external chat-bot widget; it reports back by
//! posting a message to this window. Only the exact
//! `{type: "tg-auth-success", token, userData}` shape is acted on — any
//! other message is ignored without logging.

use serde::Deserialize;
use sf_types::UserData;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom;
use crate::render;
use crate::ProfileHandle;

const AUTH_SUCCESS: &str = "tg-auth-success";

#[derive(Deserialize)]
struct AuthMessage {
    #[serde(rename = "type")]
    kind: String,
    token: String,
    #[serde(rename = "userData")]
    user_data: UserData,
}

/// Listen for the auth-success message on the window. On receipt the
/// profile transitions to logged-in, persists the token and user record
/// exactly as given, and re-renders.
pub fn bind_message_listener(profile: &ProfileHandle) {
    let profile = profile.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::MessageEvent| {
        let Some(msg) = parse_auth_message(&event.data()) else {
            return;
        };
        profile
            .borrow_mut()
            .handle_auth_success(&msg.token, msg.user_data);
        render::update_ui(&profile);
    }) as Box<dyn FnMut(_)>);

    dom::window()
        .add_event_listener_with_callback("message", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Round-trip the event payload through JSON so the message shape check and
/// the persisted record both see plain data, whatever object the sender
/// posted.
fn parse_auth_message(data: &JsValue) -> Option<AuthMessage> {
    let raw: String = js_sys::JSON::stringify(data).ok()?.as_string()?;
    let msg: AuthMessage = serde_json::from_str(&raw).ok()?;
    (msg.kind == AUTH_SUCCESS).then_some(msg)
}
