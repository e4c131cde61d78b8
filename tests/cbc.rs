use cryptal_sym::Error;
use cryptal_sym::PaddingError;
use cryptal_sym::cipher::{BlockCipher, Blowfish, Twofish};
use cryptal_sym::mode::Cbc;
use cryptal_sym::padding::{Iso7816, Pkcs7, ZeroPadding};

const BF_KEY: &str = "0123456789abcdeff0e1d2c3b4a59687";
const BF_IV: &str = "fedcba9876543210";
const BF_PLAIN: &str = "37363534333231204e6f77206973207468652074696d6520666f722000";

fn blowfish(key: &[u8]) -> Blowfish {
    Blowfish::new(key).unwrap()
}

fn encrypt<P: cryptal_sym::padding::Pad>(cbc: &Cbc<Blowfish, P>, plain: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; cbc.encrypt_size(plain.len())];
    let written = cbc.encrypt_into(&mut out, plain).unwrap();
    assert_eq!(written, out.len());
    out
}

#[test]
fn test_blowfish_cbc_zero_key_pkcs7() {
    let cbc = Cbc::new(blowfish(&[0u8; 8]), Pkcs7, &[0u8; 8]).unwrap();
    let out = encrypt(&cbc, &[0u8; 8]);
    assert_eq!(hex::encode(&out), "4ef997456198dd78b1cb8d069562c76b");
}

#[test]
fn test_blowfish_cbc_empty_message_is_one_pad_block() {
    let cbc = Cbc::new(blowfish(&[0u8; 8]), Pkcs7, &[0u8; 8]).unwrap();
    assert_eq!(cbc.encrypt_size(0), 8);

    let out = encrypt(&cbc, &[]);
    assert_eq!(hex::encode(&out), "b0d4acb28aa5ebe3");

    let mut plain = [0xffu8; 8];
    assert_eq!(cbc.decrypt_into(&mut plain, &out).unwrap(), 0);
}

#[test]
fn test_blowfish_cbc_zero_padding_reference_vector() {
    let key = hex::decode(BF_KEY).unwrap();
    let iv = hex::decode(BF_IV).unwrap();
    let plain = hex::decode(BF_PLAIN).unwrap();

    let cbc = Cbc::new(blowfish(&key), ZeroPadding, &iv).unwrap();
    let out = encrypt(&cbc, &plain);
    assert_eq!(
        hex::encode(&out),
        "6b77b4d63006dee605b156e27403979358deb9e7154616d959f1652bd5ff92cc"
    );
}

#[test]
fn test_blowfish_cbc_pkcs7_and_iso7816_vectors() {
    let key = hex::decode(BF_KEY).unwrap();
    let iv = hex::decode(BF_IV).unwrap();
    let plain = hex::decode(BF_PLAIN).unwrap();

    let pkcs7 = Cbc::new(blowfish(&key), Pkcs7, &iv).unwrap();
    let out = encrypt(&pkcs7, &plain);
    assert_eq!(
        hex::encode(&out),
        "6b77b4d63006dee605b156e27403979358deb9e7154616d9749decbec05d264b"
    );

    let mut back = vec![0u8; out.len()];
    let n = pkcs7.decrypt_into(&mut back, &out).unwrap();
    assert_eq!(&back[..n], &plain[..]);

    let iso = Cbc::new(blowfish(&key), Iso7816, &iv).unwrap();
    let out = encrypt(&iso, &plain);
    assert_eq!(
        hex::encode(&out),
        "6b77b4d63006dee605b156e27403979358deb9e7154616d9bb3f8b9254003c40"
    );
}

#[test]
fn test_blowfish_cbc_aligned_pkcs7_adds_block() {
    let key = hex::decode(BF_KEY).unwrap();
    let iv = hex::decode(BF_IV).unwrap();
    let plain = hex::decode(BF_PLAIN).unwrap();

    let cbc = Cbc::new(blowfish(&key), Pkcs7, &iv).unwrap();
    assert_eq!(cbc.encrypt_size(16), 24);

    let out = encrypt(&cbc, &plain[..16]);
    assert_eq!(
        hex::encode(&out),
        "6b77b4d63006dee605b156e274039793f7b258ec4ee52ff3"
    );
}

#[test]
fn test_cbc_in_place_matches_into() {
    let key = hex::decode(BF_KEY).unwrap();
    let iv = hex::decode(BF_IV).unwrap();
    let plain = hex::decode(BF_PLAIN).unwrap();

    let cbc = Cbc::new(blowfish(&key), Pkcs7, &iv).unwrap();
    let expected = encrypt(&cbc, &plain);

    let mut buf = vec![0u8; cbc.encrypt_size(plain.len())];
    buf[..plain.len()].copy_from_slice(&plain);
    let n = cbc.encrypt_in_place(&mut buf, plain.len()).unwrap();
    assert_eq!(&buf[..n], &expected[..]);

    let n = cbc.decrypt_in_place(&mut buf).unwrap();
    assert_eq!(&buf[..n], &plain[..]);
}

#[test]
fn test_twofish_single_block_known_answer() {
    let cipher = Twofish::new(&[0u8; 16]).unwrap();
    assert_eq!(cipher.block_size(), 16);

    let cbc = Cbc::new(cipher, ZeroPadding, &[0u8; 16]).unwrap();
    let mut out = [0u8; 16];
    assert_eq!(cbc.encrypt_into(&mut out, &[0u8; 16]).unwrap(), 16);
    assert_eq!(hex::encode(out), "9f589f5cf6122c32b6bfec2f2ae8c35a");
}

#[test]
fn test_twofish_cbc_round_trip_all_lengths() {
    let cbc = Cbc::new(Twofish::new(&[7u8; 32]).unwrap(), Pkcs7, &[9u8; 16]).unwrap();
    let plain: Vec<u8> = (0..100u8).collect();

    for len in 0..plain.len() {
        let msg = &plain[..len];
        let mut enc = vec![0u8; cbc.encrypt_size(len)];
        cbc.encrypt_into(&mut enc, msg).unwrap();
        assert_eq!(enc.len() % 16, 0);
        assert!(enc.len() > len);

        let mut dec = vec![0u8; enc.len()];
        let n = cbc.decrypt_into(&mut dec, &enc).unwrap();
        assert_eq!(&dec[..n], msg);
    }
}

#[test]
fn test_cbc_rejects_wrong_iv_length() {
    let result = Cbc::new(blowfish(&[0u8; 8]), Pkcs7, &[0u8; 16]);
    assert!(matches!(
        result,
        Err(Error::InvalidIvLength {
            expected: 8,
            got: 16
        })
    ));
}

#[test]
fn test_cbc_rejects_unaligned_ciphertext() {
    let cbc = Cbc::new(blowfish(&[0u8; 8]), Pkcs7, &[0u8; 8]).unwrap();
    let mut out = [0u8; 16];
    assert_eq!(
        cbc.decrypt_into(&mut out, &[0u8; 12]),
        Err(Error::InvalidCiphertextLength {
            len: 12,
            block_size: 8
        })
    );
}

#[test]
fn test_cbc_rejects_short_output() {
    let cbc = Cbc::new(blowfish(&[0u8; 8]), Pkcs7, &[0u8; 8]).unwrap();
    let mut out = [0u8; 8];
    assert_eq!(
        cbc.encrypt_into(&mut out, &[0u8; 8]),
        Err(Error::BufferTooSmall { needed: 16, got: 8 })
    );
}

#[test]
fn test_cbc_reports_bad_padding() {
    let cbc = Cbc::new(blowfish(&[0u8; 8]), Pkcs7, &[0u8; 8]).unwrap();

    // Encrypting with zero padding leaves no PKCS#7 pad to strip.
    let zero = Cbc::new(blowfish(&[0u8; 8]), ZeroPadding, &[0u8; 8]).unwrap();
    let mut enc = [0u8; 8];
    zero.encrypt_into(&mut enc, &[1, 2, 3, 4, 5, 6, 7, 0]).unwrap();

    let mut out = [0u8; 8];
    assert_eq!(
        cbc.decrypt_into(&mut out, &enc),
        Err(Error::Padding(PaddingError::InvalidPadCount {
            count: 0,
            block_size: 8
        }))
    );
}

#[test]
fn test_block_index_out_of_range() {
    let cipher = blowfish(&[1u8; 16]);
    let mut buf = [0u8; 16];
    assert!(cipher.encrypt_block(&mut buf, 1).is_ok());
    assert_eq!(
        cipher.encrypt_block(&mut buf, 2),
        Err(Error::BlockOutOfRange { index: 2, len: 16 })
    );
}

#[test]
fn test_blowfish_rejects_short_key() {
    assert!(matches!(
        Blowfish::new(&[0u8; 2]),
        Err(Error::InvalidKeyLength { got: 2 })
    ));
}
