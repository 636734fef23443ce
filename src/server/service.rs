use super::context::RequestContext;
use super::request::parse_request;
use super::response::write_response;
use crate::dispatcher::Dispatcher;
use may_minihttp::{HttpService, Request, Response};
use std::io;

/// The HTTP service driving one server instance.
///
/// One clone handles each connection; all clones share the dispatcher's
/// immutable registry through its `Arc`, so request handling needs no
/// locking.
#[derive(Clone)]
pub struct AppService {
    dispatcher: Dispatcher,
}

impl AppService {
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        let mut ctx = RequestContext::new(parsed);
        self.dispatcher.dispatch(&mut ctx);
        write_response(res, ctx.into_response());
        Ok(())
    }
}
