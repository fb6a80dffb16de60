use slim_http::protocol::{Request, Response};
use slim_web::router::{Router, get};
use slim_web::{Server, handler_fn, set_content_type};
use tracing::error;

fn hello_world(_request: &Request, response: &mut Response) {
    set_content_type(response, &mime::TEXT_PLAIN);
    response.set_body("hello world");
}

#[tokio::main]
async fn main() {
    let router = Router::builder().route("/", get(handler_fn(hello_world))).build();

    let server = match Server::builder().router(router).address("127.0.0.1:3000").build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "invalid server setup");
            return;
        }
    };

    if let Err(e) = server.start().await {
        error!(cause = %e, "server stopped");
    }
}
