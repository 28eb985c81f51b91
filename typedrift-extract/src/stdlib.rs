use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use std::collections::BTreeSet;
use tracing::debug;

/// Public Go standard-library packages, `internal` and `vendor` trees excluded.
pub const BUILTIN_STDLIB_PATHS: &[&str] = &[
    "archive/tar",
    "archive/zip",
    "arena",
    "bufio",
    "bytes",
    "cmp",
    "compress/bzip2",
    "compress/flate",
    "compress/gzip",
    "compress/lzw",
    "compress/zlib",
    "container/heap",
    "container/list",
    "container/ring",
    "context",
    "crypto",
    "crypto/aes",
    "crypto/cipher",
    "crypto/des",
    "crypto/dsa",
    "crypto/ecdh",
    "crypto/ecdsa",
    "crypto/ed25519",
    "crypto/elliptic",
    "crypto/hkdf",
    "crypto/hmac",
    "crypto/md5",
    "crypto/mlkem",
    "crypto/pbkdf2",
    "crypto/rand",
    "crypto/rc4",
    "crypto/rsa",
    "crypto/sha1",
    "crypto/sha256",
    "crypto/sha3",
    "crypto/sha512",
    "crypto/subtle",
    "crypto/tls",
    "crypto/x509",
    "crypto/x509/pkix",
    "database/sql",
    "database/sql/driver",
    "debug/buildinfo",
    "debug/dwarf",
    "debug/elf",
    "debug/gosym",
    "debug/macho",
    "debug/pe",
    "debug/plan9obj",
    "embed",
    "encoding",
    "encoding/ascii85",
    "encoding/asn1",
    "encoding/base32",
    "encoding/base64",
    "encoding/binary",
    "encoding/csv",
    "encoding/gob",
    "encoding/hex",
    "encoding/json",
    "encoding/pem",
    "encoding/xml",
    "errors",
    "expvar",
    "flag",
    "fmt",
    "go/ast",
    "go/build",
    "go/build/constraint",
    "go/constant",
    "go/doc",
    "go/doc/comment",
    "go/format",
    "go/importer",
    "go/parser",
    "go/printer",
    "go/scanner",
    "go/token",
    "go/types",
    "go/version",
    "hash",
    "hash/adler32",
    "hash/crc32",
    "hash/crc64",
    "hash/fnv",
    "hash/maphash",
    "html",
    "html/template",
    "image",
    "image/color",
    "image/color/palette",
    "image/draw",
    "image/gif",
    "image/jpeg",
    "image/png",
    "index/suffixarray",
    "io",
    "io/fs",
    "io/ioutil",
    "iter",
    "log",
    "log/slog",
    "log/syslog",
    "maps",
    "math",
    "math/big",
    "math/bits",
    "math/cmplx",
    "math/rand",
    "math/rand/v2",
    "mime",
    "mime/multipart",
    "mime/quotedprintable",
    "net",
    "net/http",
    "net/http/cgi",
    "net/http/cookiejar",
    "net/http/fcgi",
    "net/http/httptest",
    "net/http/httptrace",
    "net/http/httputil",
    "net/http/pprof",
    "net/mail",
    "net/netip",
    "net/rpc",
    "net/rpc/jsonrpc",
    "net/smtp",
    "net/textproto",
    "net/url",
    "os",
    "os/exec",
    "os/signal",
    "os/user",
    "path",
    "path/filepath",
    "plugin",
    "reflect",
    "regexp",
    "regexp/syntax",
    "runtime",
    "runtime/cgo",
    "runtime/coverage",
    "runtime/debug",
    "runtime/metrics",
    "runtime/pprof",
    "runtime/race",
    "runtime/trace",
    "slices",
    "sort",
    "strconv",
    "strings",
    "structs",
    "sync",
    "sync/atomic",
    "syscall",
    "syscall/js",
    "testing",
    "testing/fstest",
    "testing/iotest",
    "testing/quick",
    "testing/slogtest",
    "text/scanner",
    "text/tabwriter",
    "text/template",
    "text/template/parse",
    "time",
    "time/tzdata",
    "unicode",
    "unicode/utf16",
    "unicode/utf8",
    "unique",
    "unsafe",
    "weak",
];

/// Immutable set of standard-library module paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StdLibTable {
    paths: BTreeSet<String>,
}

impl StdLibTable {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_STDLIB_PATHS.iter().copied())
    }

    /// Parse a newline-separated list. Blank lines and `#` comments are ignored.
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn from_file(path: &Utf8Path) -> anyhow::Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read stdlib table {}", path))?;
        let table = Self::parse(&contents);
        debug!(path = %path, entries = table.len(), "loaded stdlib table");
        Ok(table)
    }

    /// A new table holding this table's paths plus `paths`.
    pub fn union<I, S>(&self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut merged = self.paths.clone();
        merged.extend(paths.into_iter().map(Into::into));
        Self { paths: merged }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_common_paths() {
        let table = StdLibTable::builtin();
        assert!(table.contains("time"));
        assert!(table.contains("net/http"));
        assert!(!table.contains("github.com/google/uuid"));
    }

    #[test]
    fn builtin_covers_std_subpackages() {
        let table = StdLibTable::builtin();
        for path in [
            "crypto/rand",
            "os/exec",
            "compress/gzip",
            "container/list",
            "encoding/csv",
            "runtime",
            "html",
            "mime",
            "image",
            "testing",
            "embed",
            "net/http/httptest",
            "math/rand/v2",
            "unsafe",
        ] {
            assert!(table.contains(path), "missing {path}");
        }
        assert!(!table.contains("internal/abi"));
        assert!(!table.contains("golang.org/x/net/http2"));
    }

    #[test]
    fn builtin_paths_are_sorted_and_unique() {
        assert!(BUILTIN_STDLIB_PATHS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(StdLibTable::builtin().len(), BUILTIN_STDLIB_PATHS.len());
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let table = StdLibTable::parse("# std\ntime\n\n  fmt  \n# end\n");
        assert_eq!(table.len(), 2);
        assert!(table.contains("fmt"));
    }

    #[test]
    fn union_leaves_receiver_untouched() {
        let base = StdLibTable::new(["time"]);
        let merged = base.union(["internal/clock"]);
        assert_eq!(base.len(), 1);
        assert!(merged.contains("internal/clock"));
        assert!(merged.contains("time"));
    }

    #[test]
    fn empty_table_matches_nothing() {
        let table = StdLibTable::empty();
        assert!(table.is_empty());
        assert!(!table.contains("time"));
    }
}
