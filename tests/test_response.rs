use tinyhttp::http::response::{Response, ResponseHeader, StatusCode, OCTET_STREAM};
use tinyhttp::http::writer::{serialize_response, ResponseWriter};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_header_block_absent_without_content_type() {
    let header = ResponseHeader {
        close_connection: true,
        ..Default::default()
    };
    assert_eq!(header.to_bytes(), None);
}

#[test]
fn test_header_block_order() {
    let header = ResponseHeader {
        content_type: "text/plain".to_string(),
        content_encoding: "gzip".to_string(),
        content_length: 23,
        close_connection: true,
    };

    assert_eq!(
        header.to_bytes().unwrap(),
        b"Content-Encoding: gzip\r\nContent-Type: text/plain\r\nContent-Length: 23\r\nConnection: close\r\n"
    );
}

#[test]
fn test_header_block_without_encoding() {
    let header = ResponseHeader {
        content_type: "text/plain".to_string(),
        content_length: 3,
        ..Default::default()
    };

    assert_eq!(
        header.to_bytes().unwrap(),
        b"Content-Type: text/plain\r\nContent-Length: 3\r\n"
    );
}

#[test]
fn test_serialize_empty_ok() {
    let resp = Response::empty(StatusCode::Ok);
    assert_eq!(serialize_response(&resp), b"HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_serialize_text_body() {
    let resp = Response::ok("abc");
    assert_eq!(
        serialize_response(&resp),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
    );
}

#[test]
fn test_serialize_close_directive() {
    let resp = Response::ok("abc").close(true);
    assert_eq!(
        serialize_response(&resp),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\nConnection: close\r\n\r\nabc"
    );
}

#[test]
fn test_serialize_not_found() {
    assert_eq!(
        serialize_response(&Response::not_found()),
        b"HTTP/1.1 404 Not Found\r\n\r\n"
    );
}

#[test]
fn test_serialize_created_octet_stream() {
    let resp = Response::with_body(StatusCode::Created, OCTET_STREAM, b"xyz".to_vec());
    assert_eq!(
        serialize_response(&resp),
        b"HTTP/1.1 201 Created\r\nContent-Type: application/octet-stream\r\nContent-Length: 3\r\n\r\nxyz"
    );
}

#[test]
fn test_content_length_matches_body() {
    let resp = Response::ok(vec![b'a'; 300]);
    assert_eq!(resp.header.content_length, resp.body.len());
}

#[tokio::test]
async fn test_writer_writes_all_bytes() {
    let resp = Response::ok("hello");
    let mut writer = ResponseWriter::new(&resp);
    let expected = writer.as_bytes().to_vec();

    let mut out: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut out).await.unwrap();

    assert_eq!(out, expected);
}
