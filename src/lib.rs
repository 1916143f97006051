/*!
An owned-tree implementation of the Concise Binary Object Representation
(CBOR), as defined in [RFC 8949](https://www.rfc-editor.org/rfc/rfc8949.html).

A [`Value`] is built from native Rust types, encoded to bytes, and decoded
back into a fresh tree:

```
use treebor::Value;

let value = Value::Array(vec!["1337".into(), "6969".into()]);
let bytes = value.encode();
assert_eq!(Value::decode(&bytes).unwrap(), value);
```

Maps are ordered by the canonical CBOR total order over [`Value`], so every
tree has exactly one encoding. Indefinite-length inputs are accepted on
decode but re-encode in definite-length form, and floats are stored as `f64`
while encoding to the narrowest of the three IEEE widths that loses nothing.
*/

pub mod decode;
pub mod encode;

mod header;
mod value;

pub use value::Value;
