//! 内部字符串拼接工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 依次写入 `items`，项与项之间写入一次 `sep`（末尾不会残留分隔符）。
    pub(crate) fn write_joined<I>(&mut self, items: I, sep: &str)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut first = true;
        for item in items {
            if !first {
                self.buf.push_str(sep);
            }
            self.buf.push_str(item.as_ref());
            first = false;
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

/// 生成 `?, ?, ...` 形式的 n 个占位符。
pub(crate) fn placeholders(n: usize) -> String {
    let mut s = String::with_capacity(n.saturating_mul(3));
    for i in 0..n {
        if i > 0 {
            s.push_str(", ");
        }
        s.push('?');
    }
    s
}
