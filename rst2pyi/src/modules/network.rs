//! `network` is split over a module page and one page per interface class; each class page is
//! loaded when its toctree entry is reached.

use crate::error::Result;
use crate::parser::{ClassArgs, ClassFileArgs, CommonDefsArgs, DefArgs, ModuleArgs, Rst2Pyi, VarsArgs};

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    abstract_nic(shed)?;
    let next = wlan(shed)?;
    let next = wlan_wipy(shed, next)?;
    let next = cc3k(shed, next)?;
    wiznet5k(shed, next)?;
    shed.def_(
        DefArgs::new(
            ".. function:: phy_mode([mode])",
            ["def phy_mode() -> int", "def phy_mode(mode: int, /) -> None"],
        )
        .indent(0),
    )?;
    shed.write(false)?;
    Ok(())
}

fn abstract_nic(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("network", "network configuration")
            .post_doc(
                r#"
from abc import abstractmethod
from typing import Protocol, Callable, overload, Any, ClassVar, Final

import pyb


MODE_11B: Final[int] = ...
"""IEEE 802.11b"""

MODE_11G: Final[int] = ...
"""IEEE 802.11g"""

MODE_11N: Final[int] = ...
"""IEEE 802.11n"""
"#,
            )
            .end("Common network adapter interface"),
    )?;
    shed.consume_title_line(true)?;

    let constructor = ".. class:: AbstractNIC(id=None, ...)";
    let nic = shed.class_(ClassArgs::new("AbstractNIC(Protocol)", constructor))?;
    shed.def_(
        DefArgs::new(
            constructor,
            "@abstractmethod\ndef __init__(self, id: Any = None, /, *args: Any, **kwargs: Any)",
        )
        .class(nic),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: AbstractNIC.active([is_active])",
            [
                "@abstractmethod\ndef active(self, /) -> bool",
                "@abstractmethod\ndef active(self, is_active: bool, /) -> None",
            ],
        )
        .class(nic),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: AbstractNIC.connect([service_id, key=None, *, ...])",
            [
                "@abstractmethod\ndef connect(self, key: str | None = None, /, **kwargs: Any) -> None",
                "@abstractmethod\ndef connect(self, service_id: Any, key: str | None = None, /, **kwargs: Any) -> None",
            ],
        )
        .class(nic),
    )?;
    for (old, new) in [
        (
            ".. method:: AbstractNIC.disconnect()",
            "@abstractmethod\ndef disconnect(self) -> None",
        ),
        (
            ".. method:: AbstractNIC.isconnected()",
            "@abstractmethod\ndef isconnected(self) -> bool",
        ),
        (
            ".. method:: AbstractNIC.scan(*, ...)",
            "@abstractmethod\ndef scan(self, **kwargs: Any) -> list[tuple[str, ...]]",
        ),
    ] {
        shed.def_(DefArgs::new(old, new).class(nic))?;
    }
    shed.def_(
        DefArgs::new(
            ".. method:: AbstractNIC.status([param])",
            [
                "@abstractmethod\ndef status(self) -> Any",
                "@abstractmethod\ndef status(self, param: str, /) -> Any",
            ],
        )
        .class(nic),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: AbstractNIC.ifconfig([(ip, subnet, gateway, dns)])",
            [
                "@abstractmethod\ndef ifconfig(self) -> tuple[str, str, str, str]",
                "@abstractmethod\ndef ifconfig(self, ip_mask_gateway_dns: tuple[str, str, str, str], /) -> None",
            ],
        )
        .class(nic),
    )?;
    shed.defs_with_common_description(
        CommonDefsArgs::new(
            ".. method:: AbstractNIC.",
            [
                (
                    "config('param')",
                    ["@abstractmethod\ndef config(self, param: str, /) -> Any"],
                ),
                (
                    "config(param=value, ...)",
                    ["@abstractmethod\ndef config(self, **kwargs: Any) -> None"],
                ),
            ],
        )
        .end("Specific network class implementations")
        .class(nic),
    )?;
    Ok(())
}

fn wlan(shed: &mut Rst2Pyi) -> Result<&'static str> {
    let wlan = shed.class_from_file(ClassFileArgs::new("network.WLAN.rst"))?;
    shed.def_(
        DefArgs::new(
            ".. class:: WLAN(interface_id)",
            "def __init__(self, interface_id: int, /)",
        )
        .class(wlan),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: WLAN.active([is_active])",
            [
                "def active(self, /) -> bool",
                "def active(self, is_active: bool, /) -> None",
            ],
        )
        .class(wlan),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: WLAN.connect(ssid=None, password=None, *, bssid=None)",
            r#"
def connect(
   self,
   ssid: str | None = None,
   password: str | None = None,
   /,
   *,
   bssid: bytes | None = None
) -> None
"#,
        )
        .class(wlan),
    )?;
    shed.def_(DefArgs::new(".. method:: WLAN.disconnect()", "def disconnect(self) -> None").class(wlan))?;
    shed.def_(
        DefArgs::new(
            ".. method:: WLAN.scan()",
            "def scan(self) -> list[tuple[str, bytes, int, int, int, int]]",
        )
        .class(wlan),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: WLAN.status([param])",
            ["def status(self) -> int", "def status(self, param: str, /) -> int"],
        )
        .class(wlan),
    )?;
    shed.def_(
        DefArgs::new(".. method:: WLAN.isconnected()", "def isconnected(self) -> bool").class(wlan),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: WLAN.ifconfig([(ip, subnet, gateway, dns)])",
            [
                "def ifconfig(self) -> tuple[str, str, str, str]",
                "def ifconfig(self, ip_mask_gateway_dns: tuple[str, str, str, str], /) -> None",
            ],
        )
        .class(wlan),
    )?;
    let end = "network.WLANWiPy.rst";
    shed.defs_with_common_description(
        CommonDefsArgs::new(
            ".. method:: WLAN.",
            [
                ("config('param')", ["def config(self, param: str, /) -> Any"]),
                ("config(param=value, ...)", ["def config(self, **kwargs: Any) -> None"]),
            ],
        )
        .end(end)
        .class(wlan),
    )?;
    Ok(end)
}

fn wlan_wipy(shed: &mut Rst2Pyi, this: &str) -> Result<&'static str> {
    let wipy = shed.class_from_file(ClassFileArgs::new(this))?;
    shed.def_(
        DefArgs::new(
            ".. class:: WLANWiPy(id=0, ...)",
            [
                "def __init__(self, id: int = 0, /)",
                "def __init__(self, id: int, /, *, mode: int, ssid: str, auth: tuple[str, str], channel: int, antenna: int)",
            ],
        )
        .class(wipy),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: WLANWiPy.init(mode, *, ssid, auth, channel, antenna)",
            "def init(self, mode: int, /, *, ssid: str, auth: tuple[str, str], channel: int, antenna: int) -> bool",
        )
        .class(wipy),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: WLANWiPy.connect(ssid, *, auth=None, bssid=None, timeout=None)",
            r#"
def connect(
   self,
   ssid: str,
   /,
   *,
   auth: tuple[str, str] | None = None,
   bssid: bytes | None = None,
   timeout: int | None = None,
) -> None
"#,
        )
        .class(wipy),
    )?;
    for (old, new) in [
        (
            ".. method:: WLANWiPy.scan()",
            "def scan(self) -> list[tuple[str, bytes, int, int | None, int]]",
        ),
        (".. method:: WLANWiPy.disconnect()", "def disconnect(self) -> None"),
        (".. method:: WLANWiPy.isconnected()", "def isconnected(self) -> bool"),
    ] {
        shed.def_(DefArgs::new(old, new).class(wipy))?;
    }
    shed.def_(
        DefArgs::new(
            ".. method:: WLANWiPy.ifconfig(if_id=0, config=['dhcp' or configtuple])",
            [
                "def ifconfig(self, if_id: int = 0, /) -> tuple[str, str, str, str]",
                "def ifconfig(self, if_id: int = 0, /, *, config: str | tuple[str, str, str, str]) -> None",
            ],
        )
        .class(wipy),
    )?;
    for (old, getter, setter) in [
        (
            ".. method:: WLANWiPy.mode([mode])",
            "def mode(self) -> int",
            "def mode(self, mode: int, /) -> None",
        ),
        (
            ".. method:: WLANWiPy.ssid([ssid])",
            "def ssid(self) -> str",
            "def ssid(self, ssid: str, /) -> None",
        ),
        (
            ".. method:: WLANWiPy.auth([auth])",
            "def auth(self) -> int",
            "def auth(self, auth: int, /) -> None",
        ),
        (
            ".. method:: WLANWiPy.channel([channel])",
            "def channel(self) -> int",
            "def channel(self, channel: int, /) -> None",
        ),
        (
            ".. method:: WLANWiPy.antenna([antenna])",
            "def antenna(self) -> int",
            "def antenna(self, antenna: int, /) -> None",
        ),
        (
            ".. method:: WLANWiPy.mac([mac_addr])",
            "def mac(self) -> bytes",
            "def mac(self, mac: bytes, /) -> None",
        ),
    ] {
        shed.def_(DefArgs::new(old, [getter, setter]).class(wipy))?;
    }
    shed.def_(
        DefArgs::new(
            ".. method:: WLANWiPy.irq(*, handler, wake)",
            "def irq(self, *, handler: Callable[[], None], wake: int) -> Any",
        )
        .class(wipy),
    )?;

    shed.vars(VarsArgs::new(&[".. data:: WLANWiPy.STA", ".. data:: WLANWiPy.AP"]).class(wipy))?;
    shed.vars(
        VarsArgs::new(&[
            ".. data:: WLANWiPy.WEP",
            ".. data:: WLANWiPy.WPA",
            ".. data:: WLANWiPy.WPA2",
        ])
        .class(wipy),
    )?;
    let end = "network.CC3K.rst";
    shed.vars(
        VarsArgs::new(&[".. data:: WLANWiPy.INT_ANT", ".. data:: WLANWiPy.EXT_ANT"])
            .end(end)
            .class(wipy),
    )?;
    Ok(end)
}

fn cc3k(shed: &mut Rst2Pyi, this: &str) -> Result<&'static str> {
    let cc3k = shed.class_from_file(ClassFileArgs::new(this))?;
    shed.def_(
        DefArgs::new(
            ".. class:: CC3K(spi, pin_cs, pin_en, pin_irq)",
            "def __init__(self, spi: pyb.SPI, pin_cs: pyb.Pin, pin_en: pyb.Pin, pin_irq: pyb.Pin, /)",
        )
        .class(cc3k),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: CC3K.connect(ssid, key=None, *, security=WPA2, bssid=None)",
            r#"
def connect(
   self,
   ssid: str,
   key: str | None = None,
   /,
   *,
   security: int = WPA2,
   bssid: bytes | None = None,
) -> None
"#,
        )
        .class(cc3k),
    )?;
    for (old, new) in [
        (".. method:: CC3K.disconnect()", "def disconnect(self) -> None"),
        (".. method:: CC3K.isconnected()", "def isconnected(self) -> bool"),
        (
            ".. method:: CC3K.ifconfig()",
            "def ifconfig(self) -> tuple[str, str, str, str, str, str, str]",
        ),
        (".. method:: CC3K.patch_version()", "def patch_version(self) -> str"),
        (
            ".. method:: CC3K.patch_program('pgm')",
            "def patch_program(self, cmd: str, /) -> None",
        ),
    ] {
        shed.def_(DefArgs::new(old, new).class(cc3k))?;
    }
    let end = "network.WIZNET5K.rst";
    shed.vars(
        VarsArgs::new(&[".. data:: CC3K.WEP", ".. data:: CC3K.WPA", ".. data:: CC3K.WPA2"])
            .end(end)
            .class(cc3k),
    )?;
    Ok(end)
}

fn wiznet5k(shed: &mut Rst2Pyi, this: &str) -> Result<()> {
    let wiznet = shed.class_from_file(ClassFileArgs::new(this))?;
    shed.def_(
        DefArgs::new(
            ".. class:: WIZNET5K(spi, pin_cs, pin_rst)",
            "def __init__(self, spi: pyb.SPI, pin_cs: pyb.Pin, pin_rst: pyb.Pin, /)",
        )
        .class(wiznet),
    )?;
    shed.def_(
        DefArgs::new(".. method:: WIZNET5K.isconnected()", "def isconnected(self) -> bool")
            .class(wiznet),
    )?;
    shed.def_(
        DefArgs::new(
            ".. method:: WIZNET5K.ifconfig([(ip, subnet, gateway, dns)])",
            [
                "def ifconfig(self) -> tuple[str, str, str, str]",
                "def ifconfig(self, config: tuple[str, str, str, str], /) -> None",
            ],
        )
        .class(wiznet),
    )?;
    shed.def_(
        DefArgs::new(".. method:: WIZNET5K.regs()", "def regs(self) -> Any")
            .end("Network functions")
            .class(wiznet),
    )?;
    Ok(())
}
