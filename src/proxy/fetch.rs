//! Atom prefetching.
//!
//! `--prefetchatoms` seeds every connection's atom cache with the names the
//! server already has interned. The list is obtained over a short-lived
//! unauthenticated connection that walks GetAtomName upward from the first
//! non-predefined id until the server answers with an Atom error.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use super::display::DisplayInfo;
use super::listener::connect_upstream;
use super::stream::ProxyStream;
use crate::protocol::atoms::PREDEFINED_MAX;
use crate::{Error, Result};

/// Safety bound on how many atoms one server walk may collect.
const MAX_FETCHED_ATOMS: u32 = 100_000;

/// Fetch the names of atoms `PREDEFINED_MAX+1..` from the server.
pub async fn fetch_atom_names(disp: &DisplayInfo) -> Result<Vec<String>> {
    let names = match connect_upstream(disp).await? {
        ProxyStream::Tcp(stream) => walk_atoms(stream).await?,
        ProxyStream::Unix(stream) => walk_atoms(stream).await?,
    };
    info!("prefetched {} atoms from '{}'", names.len(), disp.name);
    Ok(names)
}

async fn walk_atoms<S: AsyncRead + AsyncWrite + Unpin>(mut stream: S) -> Result<Vec<String>> {
    // Bare little-endian setup with no authorization.
    let mut setup = Vec::with_capacity(12);
    setup.push(b'l');
    setup.push(0);
    setup.extend_from_slice(&11u16.to_le_bytes());
    setup.extend_from_slice(&0u16.to_le_bytes());
    setup.extend_from_slice(&0u16.to_le_bytes());
    setup.extend_from_slice(&0u16.to_le_bytes());
    setup.extend_from_slice(&[0, 0]);
    stream.write_all(&setup).await?;

    let mut head = [0u8; 8];
    stream.read_exact(&mut head).await?;
    if head[0] != 1 {
        return Err(Error::Setup(
            "server refused the unauthenticated prefetch connection".to_string(),
        ));
    }
    let extra = u16::from_le_bytes([head[6], head[7]]) as usize * 4;
    discard(&mut stream, extra).await?;

    let mut names = Vec::new();
    for atom in PREDEFINED_MAX + 1..=PREDEFINED_MAX + MAX_FETCHED_ATOMS {
        let mut request = Vec::with_capacity(8);
        request.push(17); // GetAtomName
        request.push(0);
        request.extend_from_slice(&2u16.to_le_bytes());
        request.extend_from_slice(&atom.to_le_bytes());
        stream.write_all(&request).await?;

        let mut response = [0u8; 32];
        stream.read_exact(&mut response).await?;
        match response[0] {
            0 => {
                // An Atom error marks the end of the server's table.
                debug!("atom walk stopped at {} (error code {})", atom, response[1]);
                break;
            }
            1 => {
                let extra = u32::from_le_bytes([
                    response[4],
                    response[5],
                    response[6],
                    response[7],
                ]) as usize
                    * 4;
                let name_len =
                    u16::from_le_bytes([response[8], response[9]]) as usize;
                let mut body = vec![0u8; extra];
                stream.read_exact(&mut body).await?;
                let name = String::from_utf8_lossy(&body[..name_len.min(body.len())]).into_owned();
                names.push(name);
            }
            other => {
                // An event on a connection that asked for none; give up.
                debug!("unexpected response {} during atom walk", other);
                break;
            }
        }
    }
    Ok(names)
}

async fn discard<S: AsyncRead + Unpin>(stream: &mut S, mut n: usize) -> Result<()> {
    let mut scratch = [0u8; 4096];
    while n > 0 {
        let take = n.min(scratch.len());
        stream.read_exact(&mut scratch[..take]).await?;
        n -= take;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UnixStream;

    /// Serve a scripted setup-success plus two atoms then an Atom error.
    async fn fake_server(mut stream: UnixStream) {
        let mut setup = [0u8; 12];
        stream.read_exact(&mut setup).await.unwrap();
        // Success header with no additional data.
        let mut reply = vec![1u8, 0];
        reply.extend_from_slice(&11u16.to_le_bytes());
        reply.extend_from_slice(&0u16.to_le_bytes());
        reply.extend_from_slice(&0u16.to_le_bytes());
        stream.write_all(&reply).await.unwrap();

        let names = ["WM_STATE", "CLIPBOARD"];
        for name in names {
            let mut request = [0u8; 8];
            stream.read_exact(&mut request).await.unwrap();
            assert_eq!(request[0], 17);

            let padded = crate::protocol::pad(name.len());
            let mut reply = vec![1u8, 0, 0, 0];
            reply.extend_from_slice(&((padded / 4) as u32).to_le_bytes());
            reply.extend_from_slice(&(name.len() as u16).to_le_bytes());
            reply.resize(32, 0);
            reply.extend_from_slice(name.as_bytes());
            reply.resize(32 + padded, 0);
            stream.write_all(&reply).await.unwrap();
        }

        let mut request = [0u8; 8];
        stream.read_exact(&mut request).await.unwrap();
        let mut error = vec![0u8, crate::protocol::errors::ATOM];
        error.resize(32, 0);
        stream.write_all(&error).await.unwrap();
    }

    #[tokio::test]
    async fn walks_atoms_until_error() {
        let (ours, theirs) = UnixStream::pair().unwrap();
        let server = tokio::spawn(fake_server(theirs));
        let names = walk_atoms(ours).await.unwrap();
        assert_eq!(names, vec!["WM_STATE".to_string(), "CLIPBOARD".to_string()]);
        server.await.unwrap();
    }
}
