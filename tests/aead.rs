use cryptal_sym::Error;
use cryptal_sym::aead::{
    Aead, Ascon, ChaCha20Poly1305, Poly1305Aead, Salsa20Poly1305, Stage, XChaCha20Poly1305,
    XSalsa20Poly1305,
};
use cryptal_sym::stream::{ChaCha20, KeyNonceInit, Salsa20, StreamCipher, XChaCha20};

const PLAINTEXT: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you only one tip for the future, sunscreen would be it.";
const AAD: &str = "50515253c0c1c2c3c4c5c6c7";

fn key() -> [u8; 32] {
    core::array::from_fn(|i| 0x80 + i as u8)
}

fn seal<A: Aead>(mut aead: A, ad: &[u8], plain: &[u8]) -> (Vec<u8>, [u8; 16]) {
    aead.write_ad(ad).unwrap();
    let mut buf = vec![0u8; aead.encrypt_size(plain.len())];
    aead.encrypt_into(&mut buf, plain).unwrap();
    let tag = aead.finalize().unwrap();
    assert_eq!(aead.stage(), Stage::Done);
    (buf, tag)
}

fn open<A: Aead>(mut aead: A, ad: &[u8], enc: &[u8], tag: &[u8]) -> (Vec<u8>, bool) {
    aead.write_ad(ad).unwrap();
    let mut buf = vec![0u8; enc.len()];
    aead.decrypt_into(&mut buf, enc).unwrap();
    let ok = aead.verify(tag).unwrap();
    (buf, ok)
}

fn check_vector<A: Aead>(build: impl Fn() -> A, ct_prefix: &str, tag: &str) {
    let ad = hex::decode(AAD).unwrap();

    let (enc, got_tag) = seal(build(), &ad, PLAINTEXT);
    assert_eq!(hex::encode(&enc[..16]), ct_prefix);
    assert_eq!(hex::encode(got_tag), tag);

    let (dec, ok) = open(build(), &ad, &enc, &got_tag);
    assert!(ok);
    assert_eq!(dec, PLAINTEXT);
}

#[test]
fn test_chacha20_poly1305_rfc8439() {
    let nonce = hex::decode("070000004041424344454647").unwrap();
    check_vector(
        || ChaCha20Poly1305::new(&key(), &nonce).unwrap(),
        "d31a8d34648e60db7b86afbc53ef7ec2",
        "1ae10b594f09e26a7e902ecbd0600691",
    );
}

#[test]
fn test_xchacha20_poly1305_vector() {
    let nonce = hex::decode("404142434445464748494a4b4c4d4e4f5051525354555657").unwrap();
    check_vector(
        || XChaCha20Poly1305::new(&key(), &nonce).unwrap(),
        "bd6d179d3e83d43b9576579493c0e939",
        "c0875924c1c7987947deafd8780acf49",
    );
}

#[test]
fn test_salsa20_poly1305_vector() {
    let nonce: Vec<u8> = (0..8).collect();
    check_vector(
        || Salsa20Poly1305::new(&key(), &nonce).unwrap(),
        "4cca3c9b593f5722767a006f312cd332",
        "6c95c52011d486148e8eec84c18cbd2b",
    );
}

#[test]
fn test_xsalsa20_poly1305_vector() {
    let nonce: Vec<u8> = (0..24).collect();
    check_vector(
        || XSalsa20Poly1305::new(&key(), &nonce).unwrap(),
        "ec32b28cf99da439459b938cf1baaff4",
        "fd49d8147cd0fc010ea0e9c70804b9b0",
    );
}

#[test]
fn test_chacha20_poly1305_short_nonce_vector() {
    let nonce: Vec<u8> = (0..8).collect();
    check_vector(
        || ChaCha20Poly1305::new(&key(), &nonce).unwrap(),
        "44436f98c0705432198f041ed7bb5c00",
        "15c9c1b8c60d5894cd9dbf4379032731",
    );
}

#[test]
fn test_empty_message_and_ad() {
    let mut aead = ChaCha20Poly1305::new(&[0u8; 32], &[0u8; 12]).unwrap();
    let tag = aead.finalize().unwrap();
    assert_eq!(hex::encode(tag), "4eb972c9a8fb3a1b382bb4d36f5ffad1");
}

#[test]
fn test_ad_only_message() {
    let mut aead = ChaCha20Poly1305::new(&[0u8; 32], &[0u8; 12]).unwrap();
    aead.write_ad(b"ad").unwrap();
    assert_eq!(
        hex::encode(aead.finalize().unwrap()),
        "0576f2eadb62460afac9e7a8595f99a9"
    );
}

#[test]
fn test_from_cipher_matches_new() {
    let nonce = [3u8; 12];
    let cipher = ChaCha20::new(&key(), &nonce).unwrap();

    let (a, tag_a) = seal(Poly1305Aead::from_cipher(cipher).unwrap(), b"x", b"payload");
    let (b, tag_b) = seal(
        ChaCha20Poly1305::new(&key(), &nonce).unwrap(),
        b"x",
        b"payload",
    );
    assert_eq!(a, b);
    assert_eq!(tag_a, tag_b);
}

#[test]
fn test_split_calls_match_single_call() {
    let nonce = [9u8; 24];
    let (whole, whole_tag) = seal(
        XChaCha20Poly1305::new(&key(), &nonce).unwrap(),
        b"header bytes",
        PLAINTEXT,
    );

    let mut aead = XChaCha20Poly1305::new(&key(), &nonce).unwrap();
    aead.write_ad(b"head").unwrap();
    aead.write_ad(b"er bytes").unwrap();
    let mut buf = PLAINTEXT.to_vec();
    let (first, rest) = buf.split_at_mut(17);
    aead.encrypt_in_place(first).unwrap();
    aead.encrypt_in_place(rest).unwrap();
    let tag = aead.finalize().unwrap();

    assert_eq!(buf, whole);
    assert_eq!(tag, whole_tag);
}

/// Flips every byte of the AD, the ciphertext and the tag in turn and checks
/// that none of them verifies.
fn check_tampering<A: Aead>(build: impl Fn() -> A) {
    let ad = b"associated header";
    let (enc, tag) = seal(build(), ad, b"a message longer than one rate block");
    assert!(open(build(), ad, &enc, &tag).1);

    for i in 0..ad.len() {
        let mut bad = *ad;
        bad[i] ^= 0x01;
        assert!(!open(build(), &bad, &enc, &tag).1, "ad byte {i}");
    }
    for i in 0..enc.len() {
        let mut bad = enc.clone();
        bad[i] ^= 0x40;
        assert!(!open(build(), ad, &bad, &tag).1, "ciphertext byte {i}");
    }
    for i in 0..tag.len() {
        let mut bad = tag;
        bad[i] ^= 0x80;
        assert!(!open(build(), ad, &enc, &bad).1, "tag byte {i}");
    }
}

#[test]
fn test_tampering_is_detected() {
    let k = key();
    check_tampering(|| ChaCha20Poly1305::new(&k, &[0u8; 12]).unwrap());
    check_tampering(|| ChaCha20Poly1305::new(&k, &[0u8; 8]).unwrap());
    check_tampering(|| XChaCha20Poly1305::new(&k, &[1u8; 24]).unwrap());
    check_tampering(|| Salsa20Poly1305::new(&k, &[2u8; 8]).unwrap());
    check_tampering(|| XSalsa20Poly1305::new(&k, &[3u8; 24]).unwrap());
    check_tampering(|| Ascon::ascon128(&k[..16], &[4u8; 16]).unwrap());
    check_tampering(|| Ascon::ascon128a(&k[..16], &[5u8; 16]).unwrap());
    check_tampering(|| Ascon::ascon80pq(&k[..20], &[6u8; 16]).unwrap());
}

#[test]
fn test_wrong_length_tag_does_not_verify() {
    let nonce = [0u8; 12];
    let (enc, tag) = seal(ChaCha20Poly1305::new(&key(), &nonce).unwrap(), b"", b"data");
    let (_, ok) = open(
        ChaCha20Poly1305::new(&key(), &nonce).unwrap(),
        b"",
        &enc,
        &tag[..15],
    );
    assert!(!ok);
}

#[test]
fn test_ad_after_data_is_rejected() {
    let mut aead = ChaCha20Poly1305::new(&key(), &[0u8; 12]).unwrap();
    let mut buf = [0u8; 4];
    aead.encrypt_in_place(&mut buf).unwrap();
    assert_eq!(aead.stage(), Stage::Data);
    assert_eq!(
        aead.write_ad(b"late"),
        Err(Error::InvalidStage {
            operation: "write_ad",
            stage: Stage::Data
        })
    );
}

#[test]
fn test_nothing_is_allowed_after_done() {
    let mut aead = XSalsa20Poly1305::new(&key(), &[0u8; 24]).unwrap();
    aead.finalize().unwrap();

    let mut buf = [0u8; 4];
    assert!(matches!(
        aead.encrypt_in_place(&mut buf),
        Err(Error::InvalidStage {
            stage: Stage::Done,
            ..
        })
    ));
    assert!(matches!(
        aead.decrypt_in_place(&mut buf),
        Err(Error::InvalidStage {
            stage: Stage::Done,
            ..
        })
    ));
    assert!(matches!(aead.write_ad(b"x"), Err(Error::InvalidStage { .. })));
    assert!(matches!(aead.finalize(), Err(Error::InvalidStage { .. })));
    assert_eq!(
        aead.verify(&[0u8; 16]),
        Err(Error::InvalidStage {
            operation: "verify",
            stage: Stage::Done
        })
    );
}

#[test]
fn test_stage_progression() {
    let mut aead = Salsa20Poly1305::new(&key(), &[0u8; 8]).unwrap();
    assert_eq!(aead.stage(), Stage::Init);
    aead.write_ad(b"ad").unwrap();
    assert_eq!(aead.stage(), Stage::AssociatedData);
    aead.encrypt_in_place(&mut [0u8; 3]).unwrap();
    assert_eq!(aead.stage(), Stage::Data);
    aead.finalize().unwrap();
    assert_eq!(aead.stage(), Stage::Done);
}

#[test]
fn test_cloned_instance_finalizes_independently() {
    let mut aead = ChaCha20Poly1305::new(&key(), &[1u8; 12]).unwrap();
    aead.write_ad(b"ad").unwrap();
    aead.encrypt_in_place(&mut [0u8; 10]).unwrap();

    let mut copy = aead.clone();
    let early = copy.finalize().unwrap();
    assert_eq!(aead.stage(), Stage::Data);

    let late = aead.finalize().unwrap();
    assert_eq!(early, late);
}

#[test]
fn test_rejects_bad_nonce() {
    assert!(matches!(
        XChaCha20Poly1305::new(&key(), &[0u8; 12]),
        Err(Error::InvalidNonceLength { got: 12 })
    ));
}

#[test]
fn test_decrypt_into_short_buffer() {
    let mut aead = ChaCha20Poly1305::new(&key(), &[0u8; 12]).unwrap();
    let mut dst = [0u8; 2];
    assert_eq!(
        aead.decrypt_into(&mut dst, b"abc"),
        Err(Error::BufferTooSmall { needed: 3, got: 2 })
    );
}

/// Zero keystream with a counter that wraps after `blocks` blocks.
struct ShortCounter {
    blocks: u64,
}

impl StreamCipher for ShortCounter {
    fn block_size(&self) -> usize {
        64
    }

    fn apply_keystream(&mut self, _buf: &mut [u8]) {}

    fn keystream_blocks(&self) -> Option<u64> {
        Some(self.blocks)
    }
}

#[test]
fn test_data_stops_before_counter_wraps() {
    // Block 0 keys the MAC, leaving two 64-byte blocks for data
    let mut aead = Poly1305Aead::from_cipher(ShortCounter { blocks: 3 }).unwrap();
    aead.encrypt_in_place(&mut [0u8; 100]).unwrap();
    aead.encrypt_in_place(&mut [0u8; 28]).unwrap();
    assert_eq!(
        aead.encrypt_in_place(&mut [0u8; 1]),
        Err(Error::KeystreamExhausted { limit: 128 })
    );
    assert_eq!(aead.stage(), Stage::Data);
    aead.finalize().unwrap();

    let mut aead = Poly1305Aead::from_cipher(ShortCounter { blocks: 3 }).unwrap();
    assert_eq!(
        aead.decrypt_in_place(&mut [0u8; 129]),
        Err(Error::KeystreamExhausted { limit: 128 })
    );
}

#[test]
fn test_keystream_bounds() {
    let k = key();
    assert_eq!(
        ChaCha20::new(&k, &[0u8; 12]).unwrap().keystream_blocks(),
        Some(1 << 32)
    );
    assert_eq!(
        XChaCha20::new(&k, &[0u8; 24]).unwrap().keystream_blocks(),
        Some(1 << 32)
    );
    assert_eq!(ChaCha20::new(&k, &[0u8; 8]).unwrap().keystream_blocks(), None);
    assert_eq!(Salsa20::new(&k, &[0u8; 8]).unwrap().keystream_blocks(), None);
}
