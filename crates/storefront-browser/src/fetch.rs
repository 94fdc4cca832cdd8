// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Send an [`ApiRequest`] with `window.fetch` and hand the reply to a
//! callback.
//!
//! Promise chains are driven with `then2` and one-shot closures. Every path
//! (request construction, network failure, body read) ends in exactly one
//! call of the delivery callback.

use std::cell::RefCell;
use std::rc::Rc;

use storefront_pages::api::ApiRequest;
use storefront_pages::reply::ApiError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Headers, Request, RequestInit, Response, Window};

use crate::console::describe;

/// Raw reply: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status.
    pub status: u16,
    /// Body as text.
    pub body: String,
}

type Deliver = Box<dyn FnOnce(Result<Reply, ApiError>)>;
type Sink = Rc<RefCell<Option<Deliver>>>;

fn finish(sink: &Sink, result: Result<Reply, ApiError>) {
    let deliver = sink.borrow_mut().take();
    if let Some(deliver) = deliver {
        deliver(result);
    }
}

fn transport(err: &JsValue) -> ApiError {
    ApiError::Transport(describe(err))
}

fn build(request: &ApiRequest) -> Result<Request, JsValue> {
    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    let headers = Headers::new()?;
    for (name, value) in &request.headers {
        headers.set(name, value)?;
    }
    init.set_headers(&headers);
    if let Some(body) = &request.body {
        init.set_body(&JsValue::from_str(body));
    }
    Request::new_with_str_and_init(&request.url, &init)
}

/// Send `request`; `deliver` receives the reply or the transport failure.
pub(crate) fn send<F>(window: &Window, request: &ApiRequest, deliver: F)
where
    F: FnOnce(Result<Reply, ApiError>) + 'static,
{
    let sink: Sink = Rc::new(RefCell::new(Some(Box::new(deliver))));
    let js_request = match build(request) {
        Ok(js_request) => js_request,
        Err(err) => {
            finish(&sink, Err(transport(&err)));
            return;
        }
    };
    let on_response = {
        let sink = Rc::clone(&sink);
        Closure::once(move |value: JsValue| read_body(value, sink))
    };
    let on_failure = {
        let sink = Rc::clone(&sink);
        Closure::once(move |err: JsValue| finish(&sink, Err(transport(&err))))
    };
    let _ = window
        .fetch_with_request(&js_request)
        .then2(&on_response, &on_failure);
    on_response.forget();
    on_failure.forget();
}

fn read_body(value: JsValue, sink: Sink) {
    let response = match value.dyn_into::<Response>() {
        Ok(response) => response,
        Err(value) => {
            finish(&sink, Err(transport(&value)));
            return;
        }
    };
    let status = response.status();
    let text = match response.text() {
        Ok(text) => text,
        Err(err) => {
            finish(&sink, Err(transport(&err)));
            return;
        }
    };
    let on_text = {
        let sink = Rc::clone(&sink);
        Closure::once(move |body: JsValue| {
            let body = body.as_string().unwrap_or_default();
            finish(&sink, Ok(Reply { status, body }));
        })
    };
    let on_failure = Closure::once(move |err: JsValue| finish(&sink, Err(transport(&err))));
    let _ = text.then2(&on_text, &on_failure);
    on_text.forget();
    on_failure.forget();
}
