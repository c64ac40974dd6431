//! Request inspector: a minimal TCP server around the parser.
//!
//! Parses every request on every connection, prints a one-line summary, and
//! answers with a small plain-text acknowledgement. Try it with:
//!
//! ```text
//! cargo run --example inspector
//! curl 'http://127.0.0.1:8080/api/users?sort=name&debug' -d 'hello'
//! ```

use reqstream::{limits::ReqLimits, ParseError, Parser, Request};
use tokio::{
    io::{AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
};

#[tokio::main]
async fn main() {
    let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
    println!("listening on 127.0.0.1:8080");

    loop {
        let (stream, peer) = listener.accept().await.unwrap();

        tokio::spawn(async move {
            if let Err(err) = serve(stream).await {
                eprintln!("{peer}: {err}");
            }
        });
    }
}

async fn serve(stream: TcpStream) -> Result<(), ParseError> {
    let limits = ReqLimits::default();
    let mut parser = Parser::new(limits.clone());
    let mut request = Request::new(&limits);

    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    loop {
        parser.parse(&mut reader, &mut request).await?;

        println!(
            "{} {} ({} query fields, {} headers, body: {} bytes)",
            request.method().as_str(),
            request.raw_target_str().unwrap_or("<non-utf8>"),
            request.query_fields().len(),
            request.headers().len(),
            request.body().map_or(0, <[u8]>::len),
        );

        let body = format!(
            "inspected {} {}\n",
            request.method().as_str(),
            request.path_str().unwrap_or("<non-utf8>"),
        );
        let reply = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: {}\r\n\r\n{}",
            body.len(),
            body,
        );
        write_half.write_all(reply.as_bytes()).await?;
    }
}
