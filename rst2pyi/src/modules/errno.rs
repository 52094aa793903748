use crate::error::Result;
use crate::model::VarKind;
use crate::parser::{ModuleArgs, Rst2Pyi, VarsArgs};

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("errno", "system error codes")
            .post_doc("from typing import Final, Dict")
            .end("Constants"),
    )?;
    shed.consume_header_line(true)?;
    shed.vars(
        VarsArgs::new(&[".. data:: EEXIST, EAGAIN, etc."])
            .kind(VarKind::Module)
            .final_(true),
    )?;
    shed.vars(
        VarsArgs::new(&[".. data:: errorcode"])
            .type_("Dict[int, str]")
            .kind(VarKind::Module)
            .final_(true),
    )?;
    shed.write(true)?;
    Ok(())
}
