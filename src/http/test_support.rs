use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};

pub(crate) struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Listener that accepts connections and then stays silent, holding each
/// accepted socket open. Against an `https` target the TLS handshake can
/// never complete, so the connect phase stalls until a deadline fires.
pub(crate) fn spawn_silent_server() -> Result<(String, ServerHandle), String> {
    let (listener, addr) = bind_local()?;
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let mut held = Vec::new();
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            match listener.accept() {
                Ok((stream, _)) => held.push(stream),
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
        drop(held);
    });

    Ok((
        addr,
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// TLS stub server with a self-signed certificate: reads the request,
/// sleeps for `delay`, then writes a minimal 200 response.
pub(crate) fn spawn_tls_server(delay: Duration) -> Result<(String, ServerHandle), String> {
    let config = Arc::new(self_signed_config()?);
    let (listener, addr) = bind_local()?;
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            match listener.accept() {
                Ok((stream, _)) => {
                    let config = Arc::clone(&config);
                    thread::spawn(move || handle_tls_client(stream, &config, delay));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        addr,
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn bind_local() -> Result<(TcpListener, String), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;
    Ok((listener, addr.to_string()))
}

fn self_signed_config() -> Result<rustls::ServerConfig, String> {
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_owned()])
        .map_err(|err| format!("generate certificate failed: {}", err))?;
    let cert_der = cert
        .serialize_der()
        .map_err(|err| format!("serialize certificate failed: {}", err))?;
    let key_der = cert.serialize_private_key_der();

    rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(
            vec![CertificateDer::from(cert_der)],
            PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_der)),
        )
        .map_err(|err| format!("server config failed: {}", err))
}

fn handle_tls_client(stream: TcpStream, config: &Arc<rustls::ServerConfig>, delay: Duration) {
    let conn = match rustls::ServerConnection::new(Arc::clone(config)) {
        Ok(conn) => conn,
        Err(_) => return,
    };
    // Accepted sockets inherit nonblocking from the listener on some
    // platforms; the handshake needs blocking I/O.
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut tls = rustls::StreamOwned::new(conn, stream);

    let mut buffer = [0u8; 2048];
    if tls.read(&mut buffer).is_err() {
        return;
    }
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    if tls
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok")
        .is_err()
    {
        return;
    }
    drop(tls.flush());
}
