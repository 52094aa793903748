use crate::error::Result;
use crate::model::VarKind;
use crate::parser::{ClassArgs, CommonDefsArgs, DefArgs, ModuleArgs, Rst2Pyi, VarsArgs};

const FORMATS: &[&str] = &[
    ".. data:: framebuf.MONO_VLSB",
    ".. data:: framebuf.MONO_HLSB",
    ".. data:: framebuf.MONO_HMSB",
    ".. data:: framebuf.RGB565",
    ".. data:: framebuf.GS2_HMSB",
    ".. data:: framebuf.GS4_HMSB",
];

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("framebuf", "Frame buffer manipulation")
            .post_doc(
                r#"
from typing import overload, Final

from uio import AnyWritableBuf
"#,
            )
            .end("class FrameBuffer"),
    )?;
    shed.consume_header_line(true)?;
    let fb = shed.class_(ClassArgs::new("FrameBuffer", "Constructors"))?;
    shed.def_(
        DefArgs::new(
            ".. class:: FrameBuffer(buffer, width, height, format, stride=width, /)",
            "def __init__(self, buffer: AnyWritableBuf, width: int, height: int, format: int, stride: int = ..., /)",
        )
        .class(fb),
    )?;
    shed.def_(
        DefArgs::new(".. method:: FrameBuffer.fill(c)", "def fill(self, c: int, /) -> None")
            .class(fb),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: FrameBuffer.pixel(x, y[, c])",
            [
                "def pixel(self, x: int, y: int, /) -> int",
                "def pixel(self, x: int, y: int, c: int, /) -> None",
            ],
        )
        .class(fb),
    )?;

    let cmd = ".. method:: FrameBuffer.";
    let rect_end = format!("{}rect(x, y, w, h, c)", cmd);
    shed.defs_with_common_description(
        CommonDefsArgs::new(
            cmd,
            [
                (
                    "hline(x, y, w, c)",
                    "def hline(self, x: int, y: int, w: int, c: int, /) -> None",
                ),
                (
                    "vline(x, y, h, c)",
                    "def vline(self, x: int, y: int, h: int, c: int, /) -> None",
                ),
                (
                    "line(x1, y1, x2, y2, c)",
                    "def line(self, x1: int, y1: int, x2: int, y2: int, c: int, /) -> None",
                ),
            ],
        )
        .end(rect_end.as_str())
        .class(fb),
    )?;
    shed.defs_with_common_description(
        CommonDefsArgs::new(
            cmd,
            [
                (
                    "rect(x, y, w, h, c)",
                    "def rect(self, x: int, y: int, w: int, h: int, c: int, /) -> None",
                ),
                (
                    "fill_rect(x, y, w, h, c)",
                    "def fill_rect(self, x: int, y: int, w: int, h: int, c: int, /) -> None",
                ),
            ],
        )
        .end("Drawing text")
        .class(fb),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: FrameBuffer.text(s, x, y[, c])",
            "def text(self, s: str, x: int, y: int, c: int = 1, /) -> None",
        )
        .class(fb),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: FrameBuffer.scroll(xstep, ystep)",
            "def scroll(self, xstep: int, ystep: int, /) -> None",
        )
        .class(fb),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: FrameBuffer.blit(fbuf, x, y, key=-1, palette=None)",
            "def blit(self, fbuf: FrameBuffer, x: int, y: int, key: int = -1, palette: FrameBuffer | None = None, /) -> None",
        )
        .class(fb),
    )?;

    for &format in FORMATS {
        shed.vars(VarsArgs::new(&[format]).kind(VarKind::Module))?;
    }
    shed.vars(
        VarsArgs::new(&[".. data:: framebuf.GS8"])
            .kind(VarKind::Module)
            .end(None),
    )?;
    shed.write(false)?;
    Ok(())
}
