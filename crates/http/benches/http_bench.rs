use bytes::{Bytes, BytesMut};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use http::header::ACCEPT_ENCODING;
use http::{HeaderMap, HeaderValue};
use slim_http::codec::{RequestDecoder, ResponseEncoder};
use slim_http::connection::{HttpConnection, ResponseWriter};
use slim_http::handler::make_handler;
use slim_http::protocol::{Frame, Method, PayloadItem, PayloadSize, Request, Response, ResponseHead, Status};
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio_util::codec::{Decoder, Encoder};

fn hello_world(_request: &mut Request) -> Response {
    let mut response = Response::new(Status::Ok);
    response.set_body("Hello World!");
    response
}

fn bench_request_decoder(c: &mut Criterion) {
    let get = &b"GET /echo/hello HTTP/1.1\r\nHost: localhost\r\nUser-Agent: bench/1.0\r\nAccept: */*\r\n\r\n"[..];
    let post = &b"POST /files/notes HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello"[..];

    let mut group = c.benchmark_group("decode_request");
    for (name, raw) in [("get", get), ("post_with_body", post)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| {
                let mut decoder = RequestDecoder::new();
                let mut bytes = BytesMut::from(raw);
                black_box(decoder.decode(&mut bytes).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_response_encoder(c: &mut Criterion) {
    let body = Bytes::from_static(b"Hello World!");

    c.bench_function("encode_length_response", |b| {
        b.iter(|| {
            let mut encoder = ResponseEncoder::new();
            let mut bytes = BytesMut::new();
            let head = ResponseHead::new(Status::Ok, HeaderMap::new());
            encoder.encode(Frame::Head(head, PayloadSize::Length(body.len() as u64)), &mut bytes).unwrap();
            encoder.encode(Frame::from(body.clone()), &mut bytes).unwrap();
            encoder.encode(Frame::Body(PayloadItem::Eof), &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_response_writer(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let body = "Hello World! ".repeat(100);
    let body = body.as_str();
    let plain = Request::new(Method::Get, "/");
    let mut gzip = Request::new(Method::Get, "/");
    gzip.headers_mut().insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

    let mut group = c.benchmark_group("write_response");
    for (name, request) in [("plain", &plain), ("gzip", &gzip)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), request, |b, request| {
            b.to_async(&runtime).iter(|| async move {
                let mut writer = ResponseWriter::new(Vec::new());
                let mut response = Response::new(Status::Ok);
                response.set_body(body.to_owned());
                black_box(writer.write(request, response).await.unwrap());
            });
        });
    }
    group.finish();
}

fn bench_http_connection(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\nGET / HTTP/1.1\r\nConnection: close\r\n\r\n";
    let handler = Arc::new(make_handler(hello_world));
    let handler = &handler;

    c.bench_function("process_two_requests", |b| {
        b.to_async(&runtime).iter(|| async move {
            let connection = HttpConnection::new(&raw[..], Vec::new());
            black_box(connection.process(Arc::clone(handler)).await.unwrap());
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_response_writer, bench_http_connection);
criterion_main!(benches);
